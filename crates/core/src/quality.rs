//! Water quality tiers.
//!
//! Two rule sets are in use and both are kept:
//! - pH only, for map markers and the legend (three visible tiers)
//! - pH plus TDS, for the table status badge (four tiers)

use serde::{Deserialize, Serialize};

/// Lower and upper bound of the normal drinking-water pH band.
pub const PH_NORMAL: (f64, f64) = (6.5, 8.5);

/// Band that is still tolerable once outside the normal one.
pub const PH_TOLERABLE: (f64, f64) = (6.0, 9.0);

/// Highest TDS (ppm) that counts as good.
pub const TDS_GOOD_MAX: u32 = 500;

/// Quality tier, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityStatus {
    Best,
    Good,
    Fair,
    Poor,
}

impl QualityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }

    /// Label shown on the table badge.
    pub fn badge_label(&self) -> &'static str {
        match self {
            Self::Best => "Sangat Baik",
            Self::Good => "Baik",
            Self::Fair => "Cukup",
            Self::Poor => "Buruk",
        }
    }

    /// Label shown in marker popups. pH-only mode never yields `Good`.
    pub fn marker_label(&self) -> &'static str {
        match self {
            Self::Best | Self::Good => "Baik",
            Self::Fair => "Cukup",
            Self::Poor => "Buruk",
        }
    }

    /// Marker fill color.
    pub fn marker_color(&self) -> &'static str {
        match self {
            Self::Best | Self::Good => "#22c55e",
            Self::Fair => "#eab308",
            Self::Poor => "#ef4444",
        }
    }
}

impl std::fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn within(value: f64, (low, high): (f64, f64)) -> bool {
    value >= low && value <= high
}

/// Classify with pH alone (`tds = None`) or with pH and TDS.
pub fn classify(ph: f64, tds: Option<u32>) -> QualityStatus {
    match tds {
        Some(tds) => classify_ph_tds(ph, tds),
        None => classify_ph(ph),
    }
}

/// pH-only rule used by the map.
pub fn classify_ph(ph: f64) -> QualityStatus {
    if within(ph, PH_NORMAL) {
        QualityStatus::Best
    } else if within(ph, PH_TOLERABLE) {
        QualityStatus::Fair
    } else {
        QualityStatus::Poor
    }
}

/// pH+TDS rule used by the table.
pub fn classify_ph_tds(ph: f64, tds: u32) -> QualityStatus {
    let ph_good = within(ph, PH_NORMAL);
    let tds_good = tds <= TDS_GOOD_MAX;

    if ph_good && tds_good {
        QualityStatus::Best
    } else if ph_good || tds_good {
        QualityStatus::Good
    } else if within(ph, PH_TOLERABLE) {
        QualityStatus::Fair
    } else {
        QualityStatus::Poor
    }
}
