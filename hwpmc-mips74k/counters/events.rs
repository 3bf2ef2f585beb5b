// MIPS 74K event table
//
// Event select codes come from the 74K Software User's Manual, chapter 8.
// Codes are only meaningful on the counter group they are listed under: the
// same code selects different events on even and odd counters.

use std::collections::HashMap;

use mips74k_raw::current_arch::COUNTER_PAIRS;
use once_cell::sync::Lazy;

use crate::error::{PmcError, Result};
use crate::pmc_event_table;

/// Framework identifier of the first 74K event
pub const EVENT_ID_BASE: u32 = 0x13400;

/// Physical counters an event can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterGroup {
    /// Every counter
    Any,
    /// Even counters (counter 0)
    Primary,
    /// Odd counters (counter 1)
    Secondary,
}

impl CounterGroup {
    pub fn name(&self) -> &'static str {
        match self {
            CounterGroup::Any => "any",
            CounterGroup::Primary => "primary",
            CounterGroup::Secondary => "secondary",
        }
    }

    /// True if an event in this group may run on counter `index` of `total`
    pub fn permits(&self, index: usize, total: usize) -> bool {
        if index >= total.min(COUNTER_PAIRS) {
            return false;
        }
        match self {
            CounterGroup::Any => true,
            CounterGroup::Primary => index % 2 == 0,
            CounterGroup::Secondary => index % 2 == 1,
        }
    }

    /// Counter indices this group may run on when `total` counters are driven
    pub fn counters(&self, total: usize) -> impl Iterator<Item = usize> {
        let group = *self;
        (0..total).filter(move |&index| group.permits(index, total))
    }
}

/// Counter assignment of one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMapping {
    pub group: CounterGroup,
    pub code: u8,
}

pmc_event_table! {
    /// Events countable on the 74K
    pub enum Mips74kEvent {
        Cycles => ("CYCLES", Any, 0),
        InstrExecuted => ("INSTR_EXECUTED", Any, 1),
        PredictedJr31 => ("PREDICTED_JR_31", Primary, 2),
        Jr31Mispredictions => ("JR_31_MISPREDICTIONS", Secondary, 2),
        RedirectStalls => ("REDIRECT_STALLS", Primary, 3),
        Jr31NoPredictions => ("JR_31_NO_PREDICTIONS", Secondary, 3),
        ItlbAccesses => ("ITLB_ACCESSES", Primary, 4),
        ItlbMisses => ("ITLB_MISSES", Secondary, 4),
        JtlbInsnMisses => ("JTLB_INSN_MISSES", Secondary, 5),
        IcacheAccesses => ("ICACHE_ACCESSES", Primary, 6),
        IcacheMisses => ("ICACHE_MISSES", Secondary, 6),
        IcacheMissStalls => ("ICACHE_MISS_STALLS", Primary, 7),
        UncachedIfetchStalls => ("UNCACHED_IFETCH_STALLS", Primary, 8),
        PdtraceBackStalls => ("PDTRACE_BACK_STALLS", Secondary, 8),
        IfuReplays => ("IFU_REPLAYS", Primary, 9),
        KilledFetchSlots => ("KILLED_FETCH_SLOTS", Secondary, 9),
        IfuIduMissPredUpstreamCycles => ("IFU_IDU_MISS_PRED_UPSTREAM_CYCLES", Primary, 11),
        IfuIduNoFetchCycles => ("IFU_IDU_NO_FETCH_CYCLES", Secondary, 11),
        IfuIduCloggedDownstreamCycles => ("IFU_IDU_CLOGED_DOWNSTREAM_CYCLES", Primary, 12),
        Ddq0FullDrStalls => ("DDQ0_FULL_DR_STALLS", Primary, 13),
        Ddq1FullDrStalls => ("DDQ1_FULL_DR_STALLS", Secondary, 13),
        AlcbFullDrStalls => ("ALCB_FULL_DR_STALLS", Primary, 14),
        AgcbFullDrStalls => ("AGCB_FULL_DR_STALLS", Secondary, 14),
        CldqFullDrStalls => ("CLDQ_FULL_DR_STALLS", Primary, 15),
        IodqFullDrStalls => ("IODQ_FULL_DR_STALLS", Secondary, 15),
        AluEmptyCycles => ("ALU_EMPTY_CYCLES", Primary, 16),
        AgenEmptyCycles => ("AGEN_EMPTY_CYCLES", Secondary, 16),
        AluOperandsNotReadyCycles => ("ALU_OPERANDS_NOT_READY_CYCLES", Primary, 17),
        AgenOperandsNotReadyCycles => ("AGEN_OPERANDS_NOT_READY_CYCLES", Secondary, 17),
        AluNoIssuesCycles => ("ALU_NO_ISSUES_CYCLES", Primary, 18),
        AgenNoIssuesCycles => ("AGEN_NO_ISSUES_CYCLES", Secondary, 18),
        AluBubbleCycles => ("ALU_BUBBLE_CYCLES", Primary, 19),
        AgenBubbleCycles => ("AGEN_BUBBLE_CYCLES", Secondary, 19),
        SingleIssueCycles => ("SINGLE_ISSUE_CYCLES", Primary, 20),
        DualIssueCycles => ("DUAL_ISSUE_CYCLES", Secondary, 20),
        OooAluIssueCycles => ("OOO_ALU_ISSUE_CYCLES", Primary, 21),
        OooAgenIssueCycles => ("OOO_AGEN_ISSUE_CYCLES", Secondary, 21),
        JalrJalrHbInsns => ("JALR_JALR_HB_INSNS", Primary, 22),
        DcacheLineRefillRequests => ("DCACHE_LINE_REFILL_REQUESTS", Secondary, 22),
        DcacheLoadAccesses => ("DCACHE_LOAD_ACCESSES", Primary, 23),
        DcacheAccesses => ("DCACHE_ACCESSES", Secondary, 23),
        DcacheWritebacks => ("DCACHE_WRITEBACKS", Primary, 24),
        DcacheMisses => ("DCACHE_MISSES", Secondary, 24),
        JtlbDataAccesses => ("JTLB_DATA_ACCESSES", Primary, 25),
        JtlbDataMisses => ("JTLB_DATA_MISSES", Secondary, 25),
        LoadStoreReplays => ("LOAD_STORE_REPLAYS", Primary, 26),
        VaTranslationCornerCases => ("VA_TRANSALTION_CORNER_CASES", Secondary, 26),
        LoadStoreBlockedCycles => ("LOAD_STORE_BLOCKED_CYCLES", Primary, 27),
        LoadStoreNoFillRequests => ("LOAD_STORE_NO_FILL_REQUESTS", Secondary, 27),
        L2CacheWritebacks => ("L2_CACHE_WRITEBACKS", Primary, 28),
        L2CacheAccesses => ("L2_CACHE_ACCESSES", Secondary, 28),
        L2CacheMisses => ("L2_CACHE_MISSES", Primary, 29),
        L2CacheMissCycles => ("L2_CACHE_MISS_CYCLES", Secondary, 29),
        FsbFullStalls => ("FSB_FULL_STALLS", Primary, 30),
        FsbOver50Full => ("FSB_OVER_50_FULL", Secondary, 30),
        LdqFullStalls => ("LDQ_FULL_STALLS", Primary, 31),
        LdqOver50Full => ("LDQ_OVER_50_FULL", Secondary, 31),
        WbbFullStalls => ("WBB_FULL_STALLS", Primary, 32),
        WbbOver50Full => ("WBB_OVER_50_FULL", Secondary, 32),
        LoadMissConsumerReplays => ("LOAD_MISS_CONSUMER_REPLAYS", Primary, 35),
        Cp1Cp2LoadInsns => ("CP1_CP2_LOAD_INSNS", Secondary, 35),
        JrNon31Insns => ("JR_NON_31_INSNS", Primary, 36),
        MispredictedJr31Insns => ("MISPREDICTED_JR_31_INSNS", Secondary, 36),
        BranchInsns => ("BRANCH_INSNS", Primary, 37),
        Cp1Cp2CondBranchInsns => ("CP1_CP2_COND_BRANCH_INSNS", Secondary, 37),
        BranchLikelyInsns => ("BRANCH_LIKELY_INSNS", Primary, 38),
        MispredictedBranchLikelyInsns => ("MISPREDICTED_BRANCH_LIKELY_INSNS", Secondary, 38),
        CondBranchInsns => ("COND_BRANCH_INSNS", Primary, 39),
        MispredictedBranchInsns => ("MISPREDICTED_BRANCH_INSNS", Secondary, 39),
        IntegerInsns => ("INTEGER_INSNS", Primary, 40),
        FpuInsns => ("FPU_INSNS", Secondary, 40),
        LoadInsns => ("LOAD_INSNS", Primary, 41),
        StoreInsns => ("STORE_INSNS", Secondary, 41),
        JJalInsns => ("J_JAL_INSNS", Primary, 42),
        Mips16Insns => ("MIPS16_INSNS", Secondary, 42),
        NopInsns => ("NOP_INSNS", Primary, 43),
        NtMulDivInsns => ("NT_MUL_DIV_INSNS", Secondary, 43),
        DspInsns => ("DSP_INSNS", Primary, 44),
        AluDspSaturationInsns => ("ALU_DSP_SATURATION_INSNS", Secondary, 44),
        DspBranchInsns => ("DSP_BRANCH_INSNS", Primary, 45),
        MduDspSaturationInsns => ("MDU_DSP_SATURATION_INSNS", Secondary, 45),
        UncachedLoadInsns => ("UNCACHED_LOAD_INSNS", Primary, 46),
        UncachedStoreInsns => ("UNCACHED_STORE_INSNS", Secondary, 46),
        EjtagInsnTriggers => ("EJTAG_INSN_TRIGGERS", Primary, 49),
        Cp1BranchMispredictions => ("CP1_BRANCH_MISPREDICTIONS", Primary, 50),
        ScInsns => ("SC_INSNS", Primary, 51),
        FailedScInsns => ("FAILED_SC_INSNS", Secondary, 51),
        PrefetchInsns => ("PREFETCH_INSNS", Primary, 52),
        CacheHitPrefetchInsns => ("CACHE_HIT_PREFETCH_INSNS", Secondary, 52),
        NoInsnCycles => ("NO_INSN_CYCLES", Primary, 53),
        LoadMissInsns => ("LOAD_MISS_INSNS", Secondary, 53),
        OneInsnCycles => ("ONE_INSN_CYCLES", Primary, 54),
        TwoInsnsCycles => ("TWO_INSNS_CYCLES", Secondary, 54),
        GfifoBlockedCycles => ("GFIFO_BLOCKED_CYCLES", Primary, 55),
        Cp1Cp2StoreInsns => ("CP1_CP2_STORE_INSNS", Secondary, 55),
        MispredictionStalls => ("MISPREDICTION_STALLS", Primary, 56),
        MispredictedBranchInsnsCycles => ("MISPREDICTED_BRANCH_INSNS_CYCLES", Primary, 57),
        ExceptionsTaken => ("EXCEPTIONS_TAKEN", Primary, 58),
        GraduationReplays => ("GRADUATION_REPLAYS", Secondary, 58),
        CoreextendEvents => ("COREEXTEND_EVENTS", Primary, 59),
        IspramEvents => ("ISPRAM_EVENTS", Primary, 62),
        DspramEvents => ("DSPRAM_EVENTS", Secondary, 62),
        L2CacheSingleBitErrors => ("L2_CACHE_SINGLE_BIT_ERRORS", Primary, 63),
        SystemEvent0 => ("SYSTEM_EVENT_0", Primary, 64),
        SystemEvent1 => ("SYSTEM_EVENT_1", Secondary, 64),
        SystemEvent2 => ("SYSTEM_EVENT_2", Primary, 65),
        SystemEvent3 => ("SYSTEM_EVENT_3", Secondary, 65),
        SystemEvent4 => ("SYSTEM_EVENT_4", Primary, 66),
        SystemEvent5 => ("SYSTEM_EVENT_5", Secondary, 66),
        SystemEvent6 => ("SYSTEM_EVENT_6", Primary, 67),
        SystemEvent7 => ("SYSTEM_EVENT_7", Secondary, 67),
        OcpAllRequests => ("OCP_ALL_REQUESTS", Primary, 68),
        OcpAllCacheableRequests => ("OCP_ALL_CACHEABLE_REQUESTS", Secondary, 68),
        OcpReadRequests => ("OCP_READ_REQUESTS", Primary, 69),
        OcpReadCacheableRequests => ("OCP_READ_CACHEABLE_REQUESTS", Secondary, 69),
        OcpWriteRequests => ("OCP_WRITE_REQUESTS", Primary, 70),
        OcpWriteCacheableRequests => ("OCP_WRITE_CACHEABLE_REQUESTS", Secondary, 70),
        FsbLess25Full => ("FSB_LESS_25_FULL", Primary, 74),
        Fsb2550Full => ("FSB_25_50_FULL", Secondary, 74),
        LdqLess25Full => ("LDQ_LESS_25_FULL", Primary, 75),
        Ldq2550Full => ("LDQ_25_50_FULL", Secondary, 75),
        WbbLess25Full => ("WBB_LESS_25_FULL", Primary, 76),
        Wbb2550Full => ("WBB_25_50_FULL", Secondary, 76),
    }
}

/// Number of entries in the event table
pub const EVENT_COUNT: usize = Mips74kEvent::DECLARATIONS.len();

static EVENT_TABLE: Lazy<HashMap<Mips74kEvent, EventMapping>> = Lazy::new(|| {
    Mips74kEvent::DECLARATIONS
        .iter()
        .map(|&(event, group, code)| (event, EventMapping { group, code }))
        .collect()
});

static EVENTS_BY_NAME: Lazy<HashMap<&'static str, Mips74kEvent>> = Lazy::new(|| {
    Mips74kEvent::all()
        .iter()
        .map(|&event| (event.name(), event))
        .collect()
});

impl Mips74kEvent {
    /// Framework identifier of this event
    pub fn id(&self) -> u32 {
        EVENT_ID_BASE + *self as u32
    }

    pub fn from_id(id: u32) -> Option<Self> {
        let ordinal = id.checked_sub(EVENT_ID_BASE)?;
        Self::all().get(ordinal as usize).copied()
    }

    /// Resolve a framework event name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        EVENTS_BY_NAME
            .get(name.to_ascii_uppercase().as_str())
            .copied()
    }
}

/// Counter group and select code for `event`
pub fn lookup(event: Mips74kEvent) -> Result<EventMapping> {
    EVENT_TABLE
        .get(&event)
        .copied()
        .ok_or_else(|| PmcError::UnknownEvent(event.name().to_string()))
}

/// Counter group and select code for a framework event identifier
pub fn lookup_id(id: u32) -> Result<EventMapping> {
    let event =
        Mips74kEvent::from_id(id).ok_or_else(|| PmcError::UnknownEvent(format!("0x{id:x}")))?;
    lookup(event)
}

/// Counter group and select code for a framework event name
pub fn lookup_name(name: &str) -> Result<EventMapping> {
    let event =
        Mips74kEvent::from_name(name).ok_or_else(|| PmcError::UnknownEvent(name.to_string()))?;
    lookup(event)
}
