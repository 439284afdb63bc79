use memberwise::{FromValue, IntoValue, Reflect, Reflector, values};

#[derive(Debug, Clone, PartialEq, Reflect)]
#[memberwise(name = "Color", value)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[memberwise(skip)]
    pub cached: Option<String>,
}

fn main() {
    let reflector = Reflector::new();
    let color = reflector
        .wrap(Rgb {
            r: 0,
            g: 0,
            b: 0,
            cached: None,
        })
        .unwrap();
    reflector
        .set_members(&color, &["r", "g", "b"], &values![255, 128, 0])
        .unwrap();

    let copy = Rgb::from_value(&color.clone().into_value()).unwrap();
    assert_eq!((copy.r, copy.g, copy.b), (255, 128, 0));
}
