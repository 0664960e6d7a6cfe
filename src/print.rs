//! Ink Mode System
//!
//! An ink mode decides which physical channels (white, CMYK, gloss) an object
//! prints with. The applicability table is the only place that decides which
//! layer counts are meaningful.

use serde::{Deserialize, Serialize};

use crate::generator::GeneratorError;

/// Ink channel selection. Codes are fixed by the project file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InkMode {
    #[default]
    WhiteCmyk,
    Cmyk,
    Gloss,
    White,
    CmykWhite,
    CmykWhiteCmyk,
    CmykGloss,
    WhiteCmykGloss,
    Sticker,
}

/// Which layer counts apply to an ink mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerApplicability {
    pub white: bool,
    pub cmyk: bool,
    pub gloss: bool,
}

const fn applies(white: bool, cmyk: bool, gloss: bool) -> LayerApplicability {
    LayerApplicability { white, cmyk, gloss }
}

impl InkMode {
    pub const ALL: [InkMode; 9] = [
        InkMode::WhiteCmyk,
        InkMode::Cmyk,
        InkMode::Gloss,
        InkMode::White,
        InkMode::CmykWhite,
        InkMode::CmykWhiteCmyk,
        InkMode::CmykGloss,
        InkMode::WhiteCmykGloss,
        InkMode::Sticker,
    ];

    /// Integer code written as `subPrintModel`
    pub fn code(self) -> u16 {
        match self {
            InkMode::WhiteCmyk => 0,
            InkMode::Cmyk => 1,
            InkMode::Gloss => 2,
            InkMode::White => 3,
            InkMode::CmykWhite => 4,
            InkMode::CmykWhiteCmyk => 5,
            InkMode::CmykGloss => 6,
            InkMode::WhiteCmykGloss => 7,
            InkMode::Sticker => 111,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InkMode::WhiteCmyk => "white_cmyk",
            InkMode::Cmyk => "cmyk",
            InkMode::Gloss => "gloss",
            InkMode::White => "white",
            InkMode::CmykWhite => "cmyk_white",
            InkMode::CmykWhiteCmyk => "cmyk_white_cmyk",
            InkMode::CmykGloss => "cmyk_gloss",
            InkMode::WhiteCmykGloss => "white_cmyk_gloss",
            InkMode::Sticker => "sticker",
        }
    }

    pub fn applicability(self) -> LayerApplicability {
        match self {
            InkMode::WhiteCmyk => applies(true, true, false),
            InkMode::Cmyk => applies(false, true, false),
            InkMode::Gloss => applies(false, false, true),
            InkMode::White => applies(true, false, false),
            InkMode::CmykWhite => applies(true, true, false),
            InkMode::CmykWhiteCmyk => applies(true, true, false),
            InkMode::CmykGloss => applies(false, true, true),
            InkMode::WhiteCmykGloss => applies(true, true, true),
            InkMode::Sticker => applies(false, false, false),
        }
    }
}

/// Resolved layer counts. `None` means the channel is not applicable and the
/// field is omitted from the output, which is different from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerCounts {
    pub white: Option<u32>,
    pub cmyk: Option<u32>,
    pub gloss: Option<u32>,
}

impl LayerCounts {
    /// Default applicable, unset counts to 1. Explicit counts are kept as given.
    pub fn resolve(
        mode: InkMode,
        white: Option<u32>,
        cmyk: Option<u32>,
        gloss: Option<u32>,
    ) -> Result<Self, GeneratorError> {
        let table = mode.applicability();
        Ok(Self {
            white: resolve_channel("white", table.white, white, mode)?,
            cmyk: resolve_channel("cmyk", table.cmyk, cmyk, mode)?,
            gloss: resolve_channel("gloss", table.gloss, gloss, mode)?,
        })
    }
}

fn resolve_channel(
    channel: &str,
    applies: bool,
    requested: Option<u32>,
    mode: InkMode,
) -> Result<Option<u32>, GeneratorError> {
    match requested {
        Some(0) => Err(GeneratorError::InvalidInput(format!(
            "{} layer count must be a positive integer",
            channel
        ))),
        Some(count) => {
            if !applies {
                tracing::warn!(
                    channel,
                    ink_mode = mode.name(),
                    count,
                    "layer count given for a channel the ink mode does not use"
                );
            }
            Ok(Some(count))
        }
        None if applies => Ok(Some(1)),
        None => Ok(None),
    }
}

/// Print quality recorded in the project print parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintQuality {
    Draft,
    #[default]
    Standard,
    Fine,
}

impl PrintQuality {
    pub fn code(self) -> u8 {
        match self {
            PrintQuality::Draft => 0,
            PrintQuality::Standard => 1,
            PrintQuality::Fine => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<_> = InkMode::ALL.iter().map(|m| m.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5, 6, 7, 111]);
    }

    #[test]
    fn test_default_mode_is_white_cmyk() {
        assert_eq!(InkMode::default(), InkMode::WhiteCmyk);
        assert_eq!(InkMode::default().code(), 0);
    }

    #[test]
    fn test_serde_names_match_name() {
        for mode in InkMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.name()));
            let back: InkMode = serde_json::from_str(&json).unwrap();
            assert_eq!(back, mode);
        }
    }

    #[test]
    fn test_defaults_follow_table() {
        for mode in InkMode::ALL {
            let table = mode.applicability();
            let counts = LayerCounts::resolve(mode, None, None, None).unwrap();
            assert_eq!(counts.white.is_some(), table.white, "{:?}", mode);
            assert_eq!(counts.cmyk.is_some(), table.cmyk, "{:?}", mode);
            assert_eq!(counts.gloss.is_some(), table.gloss, "{:?}", mode);
            for count in [counts.white, counts.cmyk, counts.gloss].into_iter().flatten() {
                assert_eq!(count, 1);
            }
        }
    }

    #[test]
    fn test_sticker_has_no_layers() {
        let counts = LayerCounts::resolve(InkMode::Sticker, None, None, None).unwrap();
        assert_eq!(counts, LayerCounts::default());
    }

    #[test]
    fn test_explicit_counts_kept() {
        let counts = LayerCounts::resolve(InkMode::WhiteCmyk, Some(3), Some(2), None).unwrap();
        assert_eq!(counts.white, Some(3));
        assert_eq!(counts.cmyk, Some(2));
        assert_eq!(counts.gloss, None);
    }

    #[test]
    fn test_zero_count_rejected() {
        let result = LayerCounts::resolve(InkMode::Cmyk, None, Some(0), None);
        assert!(matches!(result, Err(GeneratorError::InvalidInput(_))));
    }

    #[test]
    fn test_quality_codes() {
        assert_eq!(PrintQuality::default(), PrintQuality::Standard);
        assert_eq!(PrintQuality::Standard.code(), 1);
        assert_eq!(PrintQuality::Fine.code(), 2);
    }
}
