use serde::{Deserialize, Serialize};

/// Bar interval accepted by the chart endpoint.
///
/// The analyzer always works on daily bars; coarser intervals exist for
/// callers that want weekly or monthly candles over long ranges.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum Interval {
    #[default]
    #[serde(rename = "1d")]
    Day,
    #[serde(rename = "1wk")]
    Week,
    #[serde(rename = "1mo")]
    Month,
}

impl Interval {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Day => "1d",
            Interval::Week => "1wk",
            Interval::Month => "1mo",
        }
    }
}

/// Yahoo-specific parameters for a bars request.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct YahooBarsParams {
    /// Bar interval; defaults to daily.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,

    /// Include pre- and post-market candles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_prepost: Option<bool>,

    /// Corporate action events to annotate (e.g., "div,splits").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<String>,
}
