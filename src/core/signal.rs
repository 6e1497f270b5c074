// signal.rs - Cumulative parent-of-origin signal

use crate::data::snp::ParentCall;
use crate::error::{Result, XoError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How unresolved calls enter the signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoCallPolicy {
    /// Keep the record; the signal holds its previous value
    #[default]
    Hold,
    /// Remove the record before the signal is built
    Drop,
}

impl NoCallPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoCallPolicy::Hold => "hold",
            NoCallPolicy::Drop => "drop",
        }
    }
}

impl FromStr for NoCallPolicy {
    type Err = XoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hold" => Ok(NoCallPolicy::Hold),
            "drop" => Ok(NoCallPolicy::Drop),
            _ => Err(XoError::config(format!(
                "Invalid no-call policy '{}'. Use: hold, drop",
                s
            ))),
        }
    }
}

/// Running total of +1 (parent A) / -1 (parent B) / 0 (no call), one value
/// per record. The total is zero before the first record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    values: Vec<i64>,
}

impl Signal {
    /// Fails for fewer than two calls: such a chromosome has no interior point
    pub fn build<I>(chrom_id: &str, calls: I) -> Result<Self>
    where
        I: IntoIterator<Item = ParentCall>,
    {
        let mut total = 0i64;
        let values: Vec<i64> = calls
            .into_iter()
            .map(|call| {
                total += call.step();
                total
            })
            .collect();

        if values.len() < 2 {
            return Err(XoError::chromosome(
                chrom_id,
                format!("{} call(s), at least 2 are required to build a signal", values.len()),
            ));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
