// Feature extraction from a normalized diagnostic report.
use crate::model::{ChipsetFamily, CpuVendor, FeatureSet, GpuVendor, MemoryGeneration, NormalizedReport};
use regex::Regex;

/// Keywords that mark a laptop report outright. Deliberately narrow:
/// TOUCH, MOBILE and "INTEGRATED GRAPHICS" used to be in this list and
/// flagged desktops with iGPUs as laptops.
const LAPTOP_KEYWORDS: [&str; 3] = ["BATTERY", "LAPTOP", "NOTEBOOK"];

/// Intel is only recognized via product lines. The bare word "INTEL" shows
/// up in GPU strings ("INTEL UHD GRAPHICS") on AMD machines.
const INTEL_CPU_MARKERS: [&str; 3] = ["INTEL CORE", "PENTIUM", "CELERON"];

/// Model fragments of desktop parts that ship with 3D V-Cache.
const X3D_MODELS: [&str; 6] = ["5800", "7800", "7900", "7950", "9800", "9950"];

/// B-series boards that allow memory overclocking despite not being Z.
const INTEL_RAM_UNLOCK_BOARDS: [&str; 3] = ["B560", "B660", "B760"];

/// Ryzen families that only exist on AM5 and therefore run DDR5.
const AM5_RYZEN_MODELS: [&str; 4] = ["7600", "7700", "7900", "9000"];

/// Above this MHz/MT/s reading the modules cannot be DDR4.
const DDR5_FREQUENCY_FLOOR: u32 = 4400;

pub struct FeatureExtractor {
    // Model number followed by a mobile power-envelope suffix.
    // K/KF/KS are desktop suffixes and stay out of the alternation.
    mobile_sku: Regex,
    // Model number followed by K, optionally S or F, then a word boundary
    // so that continuations like 14900KSX do not count.
    unlocked_intel_sku: Regex,
    // First chipset-looking token wins; assembly order (summary before
    // full text) is what makes this deterministic on noisy reports.
    chipset: Regex,
    memory_frequency: Regex,
}

impl FeatureExtractor {
    pub fn new() -> Self {
        Self {
            mobile_sku: Regex::new(r"\d{4,5}(?:HK|HX|HS|HQ|H|U|P|Y)\b").unwrap(),
            unlocked_intel_sku: Regex::new(r"\d{3,5}K[SF]?\b").unwrap(),
            chipset: Regex::new(r"\b([BZXH])\d{3}[A-Z]?\b").unwrap(),
            memory_frequency: Regex::new(r"(\d{4})\s*(?:MHZ|MT/S)").unwrap(),
        }
    }

    /// Turns a report into a feature set. Total: a signal that is absent or
    /// garbled simply stays at its `false`/`Unknown` default.
    pub fn extract(&self, report: &NormalizedReport) -> FeatureSet {
        let text = report.as_str();

        FeatureSet {
            is_mobile_sku: self.mobile_sku.is_match(text),
            has_laptop_keyword: LAPTOP_KEYWORDS.iter().any(|k| text.contains(k)),
            cpu_vendor: self.cpu_vendor(text),
            is_unlocked_intel_sku: self.unlocked_intel_sku.is_match(text),
            is_x3d_sku: text.contains("X3D") && X3D_MODELS.iter().any(|m| text.contains(m)),
            chipset_family: self.chipset_family(text),
            is_intel_ram_unlock_board: INTEL_RAM_UNLOCK_BOARDS.iter().any(|b| text.contains(b)),
            gpu_vendor: Self::gpu_vendor(text),
            memory_generation: self.memory_generation(text),
        }
    }

    fn cpu_vendor(&self, text: &str) -> CpuVendor {
        if INTEL_CPU_MARKERS.iter().any(|m| text.contains(m)) {
            CpuVendor::Intel
        } else if text.contains("RYZEN") || text.contains("AMD") {
            CpuVendor::Amd
        } else {
            CpuVendor::Unknown
        }
    }

    fn chipset_family(&self, text: &str) -> ChipsetFamily {
        let Some(caps) = self.chipset.captures(text) else {
            return ChipsetFamily::Unknown;
        };
        match &caps[1] {
            "B" => ChipsetFamily::B,
            "Z" => ChipsetFamily::Z,
            "X" => ChipsetFamily::X,
            "H" => ChipsetFamily::H,
            _ => ChipsetFamily::Unknown,
        }
    }

    /// Precedence: a dedicated card always outranks an Intel GPU, so an Arc
    /// or iGPU string next to an RTX still reads as NVIDIA.
    fn gpu_vendor(text: &str) -> GpuVendor {
        let nvidia = ["NVIDIA", "GEFORCE", "RTX", "GTX"].iter().any(|k| text.contains(k));
        if nvidia {
            return GpuVendor::Nvidia;
        }
        // VEGA is an old integrated/workstation line, not a modern dedicated card.
        let amd_dedicated = ["RADEON", "RX 6", "RX 7"].iter().any(|k| text.contains(k))
            && !text.contains("VEGA");
        if amd_dedicated {
            return GpuVendor::AmdDedicated;
        }
        if text.contains("INTEL ARC") {
            return GpuVendor::IntelArc;
        }
        if text.contains("IRIS") || text.contains("INTEL UHD") {
            return GpuVendor::IntelIntegrated;
        }
        GpuVendor::Unknown
    }

    fn memory_generation(&self, text: &str) -> MemoryGeneration {
        if let Some(caps) = self.memory_frequency.captures(text) {
            if let Ok(freq) = caps[1].parse::<u32>() {
                if freq > DDR5_FREQUENCY_FLOOR {
                    return MemoryGeneration::Ddr5;
                }
            }
        }
        if text.contains("RYZEN") && AM5_RYZEN_MODELS.iter().any(|m| text.contains(m)) {
            return MemoryGeneration::Ddr5;
        }
        MemoryGeneration::Ddr4
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> FeatureSet {
        FeatureExtractor::new().extract(&NormalizedReport::from_raw(text))
    }

    #[test]
    fn mobile_suffix_is_detected() {
        assert!(extract("INTEL CORE I7-13700H").is_mobile_sku);
        assert!(extract("AMD RYZEN 7 7840HS").is_mobile_sku);
        assert!(extract("INTEL CORE I9-13980HX").is_mobile_sku);
    }

    #[test]
    fn desktop_unlocked_suffixes_are_not_mobile() {
        assert!(!extract("INTEL CORE I9-14900K").is_mobile_sku);
        assert!(!extract("INTEL CORE I9-14900KS").is_mobile_sku);
        assert!(!extract("INTEL CORE I5-13600KF").is_mobile_sku);
    }

    #[test]
    fn laptop_keywords_are_the_narrowed_set() {
        assert!(extract("BATTERY 98%").has_laptop_keyword);
        assert!(extract("GAMING NOTEBOOK").has_laptop_keyword);
        // Removed keywords must no longer fire: desktops with iGPUs
        // mention integrated graphics and touch-capable monitors.
        assert!(!extract("INTEGRATED GRAPHICS").has_laptop_keyword);
        assert!(!extract("TOUCH SCREEN MONITOR").has_laptop_keyword);
    }

    #[test]
    fn intel_needs_a_product_line_not_the_brand_word() {
        assert_eq!(extract("INTEL CORE I5-12400").cpu_vendor, CpuVendor::Intel);
        assert_eq!(extract("PENTIUM GOLD G7400").cpu_vendor, CpuVendor::Intel);
        // A Ryzen box with an Intel-branded iGPU string stays AMD.
        assert_eq!(extract("AMD RYZEN 5 5600 INTEL UHD DRIVER LEFTOVER").cpu_vendor, CpuVendor::Amd);
        assert_eq!(extract("INTEL UHD GRAPHICS 770").cpu_vendor, CpuVendor::Unknown);
    }

    #[test]
    fn unlocked_sku_stops_at_word_boundary() {
        assert!(extract("14900K").is_unlocked_intel_sku);
        assert!(extract("14900KS").is_unlocked_intel_sku);
        assert!(extract("13600KF").is_unlocked_intel_sku);
        assert!(!extract("14900KSX").is_unlocked_intel_sku);
        assert!(!extract("12400F").is_unlocked_intel_sku);
    }

    #[test]
    fn x3d_needs_a_known_model_fragment() {
        assert!(extract("AMD RYZEN 7 9800X3D").is_x3d_sku);
        assert!(extract("RYZEN 7 5800X3D B550").is_x3d_sku);
        assert!(!extract("X3D RENDERING BENCHMARK").is_x3d_sku);
    }

    #[test]
    fn first_chipset_token_wins() {
        let report = NormalizedReport::assemble(Some("Z790 AORUS"), "ALSO MENTIONS B760 LATER");
        let features = FeatureExtractor::new().extract(&report);
        assert_eq!(features.chipset_family, ChipsetFamily::Z);

        assert_eq!(extract("B650 TOMAHAWK").chipset_family, ChipsetFamily::B);
        assert_eq!(extract("NO BOARD HERE").chipset_family, ChipsetFamily::Unknown);
    }

    #[test]
    fn ram_unlock_boards_are_an_allow_list() {
        assert!(extract("MSI B760 GAMING PLUS").is_intel_ram_unlock_board);
        assert!(!extract("ASUS B460M").is_intel_ram_unlock_board);
    }

    #[test]
    fn gpu_vendor_precedence() {
        assert_eq!(extract("GEFORCE RTX 4070").gpu_vendor, GpuVendor::Nvidia);
        assert_eq!(extract("RADEON RX 7800 XT").gpu_vendor, GpuVendor::AmdDedicated);
        assert_eq!(extract("RADEON VEGA 8").gpu_vendor, GpuVendor::Unknown);
        assert_eq!(extract("INTEL ARC A770").gpu_vendor, GpuVendor::IntelArc);
        assert_eq!(extract("INTEL UHD GRAPHICS 730").gpu_vendor, GpuVendor::IntelIntegrated);
        // Dedicated card wins over iGPU leftovers.
        assert_eq!(extract("RTX 4060 INTEL UHD 770").gpu_vendor, GpuVendor::Nvidia);
    }

    #[test]
    fn ddr5_from_frequency_or_am5_model() {
        assert_eq!(extract("6000 MHZ").memory_generation, MemoryGeneration::Ddr5);
        assert_eq!(extract("5986 MT/S").memory_generation, MemoryGeneration::Ddr5);
        assert_eq!(extract("3200 MHZ").memory_generation, MemoryGeneration::Ddr4);
        assert_eq!(extract("RYZEN 5 7600").memory_generation, MemoryGeneration::Ddr5);
        // The model fragment alone is not enough without the Ryzen brand.
        assert_eq!(extract("7600 POINTS IN BENCHMARK").memory_generation, MemoryGeneration::Ddr4);
        assert_eq!(extract("").memory_generation, MemoryGeneration::Ddr4);
    }
}
