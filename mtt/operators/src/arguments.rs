use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExchangeMode {
    /// Swap a node with its parent's sibling
    #[default]
    Narrow,
    /// Swap two arbitrary nodes that do not share a parent
    Wide,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[allow(clippy::module_name_repetitions)]
pub struct SubtreeExchangeArguments {
    pub mode: ExchangeMode,
}

impl SubtreeExchangeArguments {
    #[must_use]
    pub fn narrow() -> Self {
        Self {
            mode: ExchangeMode::Narrow,
        }
    }

    #[must_use]
    pub fn wide() -> Self {
        Self {
            mode: ExchangeMode::Wide,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[allow(clippy::module_name_repetitions)]
pub struct UniformHeightArguments {}

#[cfg(test)]
mod tests {
    use super::{ExchangeMode, SubtreeExchangeArguments, UniformHeightArguments};

    #[test]
    fn exchange_defaults_to_narrow() {
        let arguments: SubtreeExchangeArguments = ron::from_str("()").unwrap();

        assert_eq!(arguments, SubtreeExchangeArguments::narrow());
        assert_eq!(arguments.mode, ExchangeMode::Narrow);
    }

    #[test]
    fn exchange_mode_parses() {
        let arguments: SubtreeExchangeArguments = ron::from_str("(mode: Wide)").unwrap();
        assert_eq!(arguments, SubtreeExchangeArguments::wide());

        assert!(ron::from_str::<SubtreeExchangeArguments>("(mode: Medium)").is_err());
        assert!(ron::from_str::<SubtreeExchangeArguments>("(width: Wide)").is_err());
    }

    #[test]
    fn uniform_height_has_no_tunables() {
        assert_eq!(
            ron::from_str::<UniformHeightArguments>("()").unwrap(),
            UniformHeightArguments {}
        );
        assert!(ron::from_str::<UniformHeightArguments>("(window: 0.5)").is_err());
    }
}
