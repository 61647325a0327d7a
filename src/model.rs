// Core structs: NormalizedReport, FeatureSet, CapabilityFlags, OfferTier
use thiserror::Error;

/// Marker lines the parser emits around the curated summary segment.
pub const SUMMARY_START: &str = "[SUMMARY]";
pub const SUMMARY_END: &str = "[/SUMMARY]";

/// Upper-cased diagnostic report text. All matching downstream is
/// case-sensitive against this single normalization; nothing re-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedReport(String);

impl NormalizedReport {
    /// Builds a report from an optional curated summary plus the full text.
    /// The summary goes first so that first-match scans (the chipset code in
    /// particular) prefer the authoritative summary over incidental mentions
    /// later in the document.
    pub fn assemble(summary: Option<&str>, full_text: &str) -> Self {
        let mut text = String::new();
        if let Some(summary) = summary {
            text.push_str(SUMMARY_START);
            text.push(' ');
            text.push_str(summary);
            text.push(' ');
            text.push_str(SUMMARY_END);
            text.push(' ');
        }
        text.push_str(full_text);
        Self(text.to_uppercase())
    }

    /// Wraps already-extracted plain text (e.g. an attached text export).
    pub fn from_raw(text: &str) -> Self {
        Self(text.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CpuVendor {
    Intel,
    Amd,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChipsetFamily {
    B,
    Z,
    X,
    H,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpuVendor {
    Nvidia,
    AmdDedicated,
    IntelArc,
    IntelIntegrated,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryGeneration {
    #[default]
    Ddr4,
    Ddr5,
}

/// Everything the classifier needs to know about one report.
/// Built once per classification call, never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureSet {
    pub is_mobile_sku: bool,
    pub has_laptop_keyword: bool,
    pub cpu_vendor: CpuVendor,
    pub is_unlocked_intel_sku: bool,
    pub is_x3d_sku: bool,
    pub chipset_family: ChipsetFamily,
    pub is_intel_ram_unlock_board: bool,
    pub gpu_vendor: GpuVendor,
    pub memory_generation: MemoryGeneration,
}

/// Which of the three overclocking services the machine is eligible for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilityFlags {
    pub cpu: bool,
    pub ram: bool,
    pub gpu: bool,
}

impl CapabilityFlags {
    pub const NONE: Self = Self { cpu: false, ram: false, gpu: false };
    pub const ALL: Self = Self { cpu: true, ram: true, gpu: true };
}

/// The single commercial offer selected for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferTier {
    pub name: &'static str,
    pub capabilities: CapabilityFlags,
    pub is_laptop: bool,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("anti-bot challenge page returned instead of the report")]
    Blocked,
    #[error("unexpected status code: {0}")]
    BadStatus(u16),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("report contains no extractable text")]
    EmptyReport,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("telegram api error: {0}")]
    ApiError(String),
    #[error("telegram unreachable")]
    Unreachable,
}

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("no price entry for tier '{0}': price table is misconfigured")]
    MissingEntry(String),
}
