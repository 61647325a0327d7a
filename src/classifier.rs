// Tier selection: capability inference plus a priority-ordered rule ladder.
use crate::extractor::FeatureExtractor;
use crate::model::{
    CapabilityFlags, ChipsetFamily, CpuVendor, FeatureSet, GpuVendor, MemoryGeneration,
    NormalizedReport, OfferTier,
};

/// Canonical tier names. The price table is keyed by these, so every name
/// listed here must have a price entry.
pub mod tier {
    pub const LAPTOP: &str = "Laptop";
    pub const SPECIAL_X3D: &str = "Special X3D";
    pub const COMPLETE_DDR5: &str = "Complete DDR5";
    pub const RAM_GPU_DDR5: &str = "RAM DDR5 + GPU";
    pub const CPU_RAM_DDR5: &str = "CPU + RAM DDR5";
    pub const CPU_DDR5: &str = "CPU DDR5";
    pub const COMPLETE_DDR4: &str = "Complete DDR4";
    pub const RAM_GPU_DDR4: &str = "RAM DDR4 + GPU";
    pub const CPU_RAM_DDR4: &str = "CPU + RAM DDR4";
    pub const CPU_DDR4: &str = "CPU DDR4";
    pub const WINDOWS_OPTIMIZATION: &str = "Windows Optimization";

    /// Every tier the classifier can produce.
    pub const ALL: &[&str] = &[
        LAPTOP,
        SPECIAL_X3D,
        COMPLETE_DDR5,
        RAM_GPU_DDR5,
        CPU_RAM_DDR5,
        CPU_DDR5,
        COMPLETE_DDR4,
        RAM_GPU_DDR4,
        CPU_RAM_DDR4,
        CPU_DDR4,
        WINDOWS_OPTIMIZATION,
    ];
}

type Guard = fn(MemoryGeneration, CapabilityFlags) -> bool;

/// The offer ladder, evaluated top-down, first match wins. Keeping this as
/// a flat ordered list makes the priority explicit and testable rung by
/// rung. The two trailing rungs are a safety net: ram+gpu must always land
/// on the pack of rung two even if an earlier rung is reordered.
const LADDER: &[(&str, Guard)] = &[
    (tier::COMPLETE_DDR5, |m, c| m == MemoryGeneration::Ddr5 && c.cpu && c.ram && c.gpu),
    (tier::RAM_GPU_DDR5, |m, c| m == MemoryGeneration::Ddr5 && !c.cpu && c.ram && c.gpu),
    (tier::CPU_RAM_DDR5, |m, c| m == MemoryGeneration::Ddr5 && c.cpu && c.ram && !c.gpu),
    (tier::CPU_DDR5, |m, c| m == MemoryGeneration::Ddr5 && c.cpu && !c.ram && !c.gpu),
    (tier::COMPLETE_DDR4, |m, c| m == MemoryGeneration::Ddr4 && c.cpu && c.ram && c.gpu),
    (tier::RAM_GPU_DDR4, |m, c| m == MemoryGeneration::Ddr4 && !c.cpu && c.ram && c.gpu),
    (tier::CPU_RAM_DDR4, |m, c| m == MemoryGeneration::Ddr4 && c.cpu && c.ram && !c.gpu),
    (tier::CPU_DDR4, |m, c| m == MemoryGeneration::Ddr4 && c.cpu && !c.ram && !c.gpu),
    (tier::RAM_GPU_DDR5, |m, c| m == MemoryGeneration::Ddr5 && c.ram && c.gpu),
    (tier::RAM_GPU_DDR4, |m, c| m == MemoryGeneration::Ddr4 && c.ram && c.gpu),
];

/// Which services the machine is eligible for, before tier selection.
pub fn infer_capabilities(features: &FeatureSet) -> CapabilityFlags {
    let (cpu, ram) = match features.cpu_vendor {
        CpuVendor::Intel => (
            features.is_unlocked_intel_sku && features.chipset_family == ChipsetFamily::Z,
            features.chipset_family == ChipsetFamily::Z || features.is_intel_ram_unlock_board,
        ),
        CpuVendor::Amd => {
            let board_unlocked =
                matches!(features.chipset_family, ChipsetFamily::B | ChipsetFamily::X);
            (board_unlocked, board_unlocked)
        }
        CpuVendor::Unknown => (false, false),
    };

    // GPU eligibility is vendor-driven, not chipset-driven. An Arc card as
    // the only GPU still counts; an integrated Intel GPU never does.
    let gpu = matches!(
        features.gpu_vendor,
        GpuVendor::Nvidia | GpuVendor::AmdDedicated | GpuVendor::IntelArc
    );

    CapabilityFlags { cpu, ram, gpu }
}

/// Maps a feature set to exactly one offer. Pure and total.
pub fn classify(features: &FeatureSet) -> OfferTier {
    // Laptop gate, terminal: no overclocking service on mobile hardware.
    if features.is_mobile_sku || features.has_laptop_keyword {
        return OfferTier {
            name: tier::LAPTOP,
            capabilities: CapabilityFlags::NONE,
            is_laptop: true,
        };
    }

    // X3D parts are always tunable via curve optimization, whatever the
    // board says, so the computed flags are overridden wholesale.
    if features.is_x3d_sku {
        return OfferTier {
            name: tier::SPECIAL_X3D,
            capabilities: CapabilityFlags::ALL,
            is_laptop: false,
        };
    }

    let capabilities = infer_capabilities(features);
    for (name, applies) in LADDER {
        if applies(features.memory_generation, capabilities) {
            return OfferTier { name, capabilities, is_laptop: false };
        }
    }

    OfferTier {
        name: tier::WINDOWS_OPTIMIZATION,
        capabilities,
        is_laptop: false,
    }
}

/// Extraction and classification bundled behind one call. The regexes are
/// compiled once here; the engine is immutable afterwards and safe to share
/// across tasks without locking.
pub struct TierEngine {
    extractor: FeatureExtractor,
}

impl TierEngine {
    pub fn new() -> Self {
        Self { extractor: FeatureExtractor::new() }
    }

    pub fn classify(&self, report: &NormalizedReport) -> OfferTier {
        classify(&self.extractor.extract(report))
    }
}

impl Default for TierEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_text(text: &str) -> OfferTier {
        TierEngine::new().classify(&NormalizedReport::from_raw(text))
    }

    #[test]
    fn mobile_sku_gates_everything_else() {
        // Unlocked CPU, Z board, dedicated GPU: the HX suffix still wins.
        let offer = classify_text("INTEL CORE I9-13980HX Z790 RTX 4090 6400 MHZ");
        assert_eq!(offer.name, tier::LAPTOP);
        assert!(offer.is_laptop);
        assert_eq!(offer.capabilities, CapabilityFlags::NONE);

        let offer = classify_text("AMD RYZEN 7 7840HS");
        assert_eq!(offer.name, tier::LAPTOP);
    }

    #[test]
    fn x3d_overrides_disqualifying_chipset() {
        // H-series board and no dedicated GPU would zero every flag.
        let offer = classify_text("AMD RYZEN 7 9800X3D H610");
        assert_eq!(offer.name, tier::SPECIAL_X3D);
        assert_eq!(offer.capabilities, CapabilityFlags::ALL);
        assert!(!offer.is_laptop);
    }

    #[test]
    fn intel_full_pack_on_ddr5() {
        let offer = classify_text("INTEL CORE I9-14900K Z790 RTX 4070 6000 MHZ");
        assert_eq!(offer.name, tier::COMPLETE_DDR5);
        assert_eq!(offer.capabilities, CapabilityFlags::ALL);
    }

    #[test]
    fn b760_is_ram_unlocked_but_not_cpu_unlocked() {
        let offer = classify_text("INTEL CORE I5-14600K B760 RTX 4060 5986 MT/S");
        assert_eq!(offer.name, tier::RAM_GPU_DDR5);
        assert_eq!(
            offer.capabilities,
            CapabilityFlags { cpu: false, ram: true, gpu: true }
        );
    }

    #[test]
    fn amd_ladder_on_ddr4() {
        let offer = classify_text("AMD RYZEN 7 5700X B550 RTX 3070 3600 MHZ");
        assert_eq!(offer.name, tier::COMPLETE_DDR4);

        let offer = classify_text("AMD RYZEN 5 5600 X570 3200 MHZ");
        assert_eq!(offer.name, tier::CPU_RAM_DDR4);
    }

    #[test]
    fn locked_intel_on_z_board_keeps_ram_only() {
        // Non-K Intel on Z690, no GPU: ram true, cpu false, gpu false.
        // No ladder rung covers ram alone, so this is a custom quote.
        let offer = classify_text("INTEL CORE I5-12400 Z690 3600 MHZ");
        assert_eq!(offer.name, tier::WINDOWS_OPTIMIZATION);
        assert_eq!(
            offer.capabilities,
            CapabilityFlags { cpu: false, ram: true, gpu: false }
        );
    }

    #[test]
    fn arc_as_only_gpu_counts_for_gpu_service() {
        let offer = classify_text("INTEL ARC A770 16GB");
        assert_eq!(offer.name, tier::WINDOWS_OPTIMIZATION);
        assert!(offer.capabilities.gpu);
        assert!(!offer.capabilities.cpu);
    }

    #[test]
    fn integrated_gpu_alone_does_not_count() {
        let offer = classify_text("INTEL UHD GRAPHICS 770");
        assert!(!offer.capabilities.gpu);
        assert_eq!(offer.name, tier::WINDOWS_OPTIMIZATION);
    }

    #[test]
    fn no_signals_fall_through_to_default() {
        let offer = classify_text("SOME OLD OFFICE TOWER");
        assert_eq!(offer.name, tier::WINDOWS_OPTIMIZATION);
        assert_eq!(offer.capabilities, CapabilityFlags::NONE);
        assert!(!offer.is_laptop);
    }

    #[test]
    fn classification_is_deterministic() {
        let engine = TierEngine::new();
        let report = NormalizedReport::from_raw("INTEL CORE I7-13700K Z690 GEFORCE RTX 3080 5600 MT/S");
        let first = engine.classify(&report);
        let second = engine.classify(&report);
        assert_eq!(first, second);
    }

    #[test]
    fn summary_chipset_beats_body_chipset() {
        let engine = TierEngine::new();
        // The body mentions a Z790 in passing (say, a comparison table),
        // but the curated summary says the board is a B660.
        let report = NormalizedReport::assemble(
            Some("Intel Core i5-13600K, B660M DS3H, RTX 4060"),
            "BENCHMARK COMPARISON VS Z790 BUILD 5600 MT/S",
        );
        let offer = engine.classify(&report);
        assert_eq!(offer.name, tier::RAM_GPU_DDR5);
        assert!(!offer.capabilities.cpu);
    }
}
