use serde::Deserialize;


/// Direction in which an envelope part is grown or an envelope is traversed.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Deserialize)]
pub enum Direction {
    Forward = 1,
    Backward = -1
}

impl Direction {
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_flips_sign() {
        assert_eq!(Direction::Forward.opposite(), Direction::Backward);
        assert_eq!(Direction::Backward.sign(), -Direction::Forward.sign());
    }
}
