use std::{fmt::Display, ops::Deref};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

impl Percentage {
    /// Share of `part` in `whole`. An empty whole counts as 0%.
    pub fn of(part: usize, whole: usize) -> Percentage {
        if whole == 0 {
            return Percentage(0.);
        }
        Percentage(part as f64 / whole as f64 * 100.)
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::Percentage;

    #[test]
    fn percentage_of_days() {
        assert_eq!(Percentage::of(0, 7).to_string(), "0.0%");
        assert_eq!(Percentage::of(3, 7).to_string(), "42.9%");
        assert_eq!(Percentage::of(7, 7).to_string(), "100.0%");
        assert_eq!(*Percentage::of(1, 0), 0.);
    }
}
