use serde::{Deserialize, Serialize};

/// How the digit is drawn relative to its background.
///
/// Serialized as the `invert` flag the classifier expects: `"true"` means
/// the service must invert before inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Polarity {
    /// Dark digit on a light background.
    #[default]
    #[serde(rename = "false")]
    DarkOnLight,
    /// Light digit on a dark background.
    #[serde(rename = "true")]
    LightOnDark,
}

impl Polarity {
    pub fn as_flag(self) -> &'static str {
        match self {
            Polarity::DarkOnLight => "false",
            Polarity::LightOnDark => "true",
        }
    }

    /// Parses the `"true"` / `"false"` form value.
    pub fn from_flag(flag: &str) -> Option<Polarity> {
        match flag.trim() {
            "false" => Some(Polarity::DarkOnLight),
            "true" => Some(Polarity::LightOnDark),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Polarity::DarkOnLight => "Negro sobre blanco",
            Polarity::LightOnDark => "Blanco sobre negro",
        }
    }
}

/// Auto-detect versus a manual override.
///
/// `Auto` keeps the last manual pick so turning auto-detect off brings it
/// back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolarityChoice {
    Auto { remembered: Polarity },
    Manual(Polarity),
}

impl Default for PolarityChoice {
    fn default() -> Self {
        PolarityChoice::Auto { remembered: Polarity::default() }
    }
}

impl PolarityChoice {
    pub fn is_auto(&self) -> bool {
        matches!(self, PolarityChoice::Auto { .. })
    }

    /// The manual value shown in the selector, whether or not it is in use.
    pub fn manual_value(&self) -> Polarity {
        match *self {
            PolarityChoice::Auto { remembered } => remembered,
            PolarityChoice::Manual(p) => p,
        }
    }

    pub fn with_auto(self, auto: bool) -> PolarityChoice {
        let manual = self.manual_value();
        if auto {
            PolarityChoice::Auto { remembered: manual }
        } else {
            PolarityChoice::Manual(manual)
        }
    }

    /// Records a manual pick; while auto-detect is on it is only remembered.
    pub fn with_manual(self, polarity: Polarity) -> PolarityChoice {
        match self {
            PolarityChoice::Auto { .. } => PolarityChoice::Auto { remembered: polarity },
            PolarityChoice::Manual(_) => PolarityChoice::Manual(polarity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_match_wire_format() {
        assert_eq!(Polarity::DarkOnLight.as_flag(), "false");
        assert_eq!(Polarity::LightOnDark.as_flag(), "true");
        assert_eq!(Polarity::from_flag("true"), Some(Polarity::LightOnDark));
        assert_eq!(Polarity::from_flag(" false "), Some(Polarity::DarkOnLight));
        assert_eq!(Polarity::from_flag("yes"), None);
        assert_eq!(serde_json::to_string(&Polarity::LightOnDark).unwrap(), "\"true\"");
    }

    #[test]
    fn default_is_auto() {
        let choice = PolarityChoice::default();
        assert!(choice.is_auto());
        assert_eq!(choice.manual_value(), Polarity::DarkOnLight);
    }

    #[test]
    fn toggling_auto_off_restores_last_manual_pick() {
        let choice = PolarityChoice::default()
            .with_auto(false)
            .with_manual(Polarity::LightOnDark)
            .with_auto(true);
        assert!(choice.is_auto());

        let restored = choice.with_auto(false);
        assert_eq!(restored, PolarityChoice::Manual(Polarity::LightOnDark));
    }

    #[test]
    fn manual_pick_while_auto_is_only_remembered() {
        let choice = PolarityChoice::default().with_manual(Polarity::LightOnDark);
        assert_eq!(choice, PolarityChoice::Auto { remembered: Polarity::LightOnDark });
    }
}
