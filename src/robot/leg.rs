use core::fmt::Display;
use core::ops::{Index, IndexMut};

use super::servo::Servo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    Left = 0,
    Right = 1,
}

impl Leg {
    /// Spanish name shown next to the explanation texts.
    pub const fn spanish_name(self) -> &'static str {
        match self {
            Leg::Left => "izquierda",
            Leg::Right => "derecha",
        }
    }
}

impl Display for Leg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Leg::Left => f.write_str("Left"),
            Leg::Right => f.write_str("Right"),
        }
    }
}

impl<PWM> Index<Leg> for [[Servo<PWM>; 3]; 2] {
    type Output = [Servo<PWM>; 3];

    fn index(&self, leg: Leg) -> &Self::Output {
        &self[leg as usize]
    }
}

impl<PWM> IndexMut<Leg> for [[Servo<PWM>; 3]; 2] {
    fn index_mut(&mut self, leg: Leg) -> &mut Self::Output {
        &mut self[leg as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(std::format!("{}", Leg::Left), "Left");
        assert_eq!(Leg::Left.spanish_name(), "izquierda");
        assert_eq!(Leg::Right.spanish_name(), "derecha");
    }
}
