//! The engine's statistic catalogue and the subsets each output accepts.
//!
//! Per-timestep subscriptions and per-grid exports accept two different
//! subsets of [`GlobalStatistics`]. They overlap but neither contains the
//! other, so each has its own predicate.

macro_rules! global_statistics {
    ($($variant:ident = $code:literal => $name:literal),* $(,)?) => {
        /// Every statistic the engine can compute, keyed by its wire code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(i32)]
        pub enum GlobalStatistics {
            $($variant = $code),*
        }

        impl GlobalStatistics {
            /// All statistics in code order.
            pub const ALL: &'static [GlobalStatistics] = &[$(GlobalStatistics::$variant),*];

            /// The engine's upper-case name for the statistic.
            pub fn name(self) -> &'static str {
                match self {
                    $(GlobalStatistics::$variant => $name),*
                }
            }
        }
    };
}

global_statistics! {
    DateTime = 0 => "DATE_TIME",
    ElapsedTime = 1 => "ELAPSED_TIME",
    TimeStepDuration = 2 => "TIME_STEP_DURATION",
    Temperature = 3 => "TEMPERATURE",
    DewPoint = 4 => "DEW_POINT",
    RelativeHumidity = 5 => "RELATIVE_HUMIDITY",
    WindSpeed = 6 => "WIND_SPEED",
    WindDirection = 7 => "WIND_DIRECTION",
    Precipitation = 8 => "PRECIPITATION",
    Hffmc = 9 => "HFFMC",
    Hisi = 10 => "HISI",
    Dmc = 11 => "DMC",
    Dc = 12 => "DC",
    Hfwi = 13 => "HFWI",
    Bui = 14 => "BUI",
    Ffmc = 15 => "FFMC",
    Isi = 16 => "ISI",
    Fwi = 17 => "FWI",
    TimestepArea = 18 => "TIMESTEP_AREA",
    TimestepBurnArea = 19 => "TIMESTEP_BURN_AREA",
    TotalArea = 20 => "TOTAL_AREA",
    TotalBurnArea = 21 => "TOTAL_BURN_AREA",
    AreaGrowthRate = 22 => "AREA_GROWTH_RATE",
    ExteriorPerimeter = 23 => "EXTERIOR_PERIMETER",
    ExteriorPerimeterGrowthRate = 24 => "EXTERIOR_PERIMETER_GROWTH_RATE",
    ActivePerimeter = 25 => "ACTIVE_PERIMETER",
    ActivePerimeterGrowthRate = 26 => "ACTIVE_PERIMETER_GROWTH_RATE",
    TotalPerimeter = 27 => "TOTAL_PERIMETER",
    TotalPerimeterGrowthRate = 28 => "TOTAL_PERIMETER_GROWTH_RATE",
    FiLt10 = 29 => "FI_LT_10",
    Fi10To500 = 30 => "FI_10_500",
    Fi500To2000 = 31 => "FI_500_2000",
    Fi2000To4000 = 32 => "FI_2000_4000",
    Fi4000To10000 = 33 => "FI_4000_10000",
    FiGt10000 = 34 => "FI_GT_10000",
    Ros0To1 = 35 => "ROS_0_1",
    Ros2To4 = 36 => "ROS_2_4",
    Ros5To8 = 37 => "ROS_5_8",
    Ros9To14 = 38 => "ROS_9_14",
    RosGt15 = 39 => "ROS_GT_15",
    MaxRos = 40 => "MAX_ROS",
    MaxFi = 41 => "MAX_FI",
    MaxFl = 42 => "MAX_FL",
    MaxCfb = 43 => "MAX_CFB",
    MaxCfc = 44 => "MAX_CFC",
    MaxSfc = 45 => "MAX_SFC",
    MaxTfc = 46 => "MAX_TFC",
    TotalFuelConsumed = 47 => "TOTAL_FUEL_CONSUMED",
    CrownFuelConsumed = 48 => "CROWN_FUEL_CONSUMED",
    SurfaceFuelConsumed = 49 => "SURFACE_FUEL_CONSUMED",
    NumActiveVertices = 50 => "NUM_ACTIVE_VERTICES",
    NumVertices = 51 => "NUM_VERTICES",
    CumulativeVertices = 52 => "CUMULATIVE_VERTICES",
    CumulativeActiveVertices = 53 => "CUMULATIVE_ACTIVE_VERTICES",
    NumActiveFronts = 54 => "NUM_ACTIVE_FRONTS",
    NumFronts = 55 => "NUM_FRONTS",
    MemoryUsedStart = 56 => "MEMORY_USED_START",
    MemoryUsedEnd = 57 => "MEMORY_USED_END",
    NumTimesteps = 58 => "NUM_TIMESTEPS",
    NumDisplayTimesteps = 59 => "NUM_DISPLAY_TIMESTEPS",
    NumEventTimesteps = 60 => "NUM_EVENT_TIMESTEPS",
    NumCalcTimesteps = 61 => "NUM_CALC_TIMESTEPS",
    Ticks = 62 => "TICKS",
    ProcessingTime = 63 => "PROCESSING_TIME",
    GrowthTime = 64 => "GROWTH_TIME",
    Raz = 65 => "RAZ",
    BurnGrid = 66 => "BURN_GRID",
    FireArrivalTime = 67 => "FIRE_ARRIVAL_TIME",
    FireArrivalTimeMin = 68 => "FIRE_ARRIVAL_TIME_MIN",
    FireArrivalTimeMax = 69 => "FIRE_ARRIVAL_TIME_MAX",
    Hros = 70 => "HROS",
    Fros = 71 => "FROS",
    Bros = 72 => "BROS",
    Rss = 73 => "RSS",
    RadiativePower = 74 => "RADIATIVE_POWER",
    Hfi = 75 => "HFI",
    Hcfb = 76 => "HCFB",
    CurrentTime = 77 => "CURRENT_TIME",
    ScenarioName = 78 => "SCENARIO_NAME",
    BurnPercentage = 79 => "BURN_PERCENTAGE",
    TotalPerimeterChange = 80 => "TOTAL_PERIMETER_CHANGE",
    ExteriorPerimeterChange = 81 => "EXTERIOR_PERIMETER_CHANGE",
    ActivePerimeterChange = 82 => "ACTIVE_PERIMETER_CHANGE",
    AreaChange = 83 => "AREA_CHANGE",
    Burn = 84 => "BURN",
}

/// Largest statistic code a stats file may use as a column.
pub const MAX_STATS_COLUMN: i32 = GlobalStatistics::GrowthTime as i32;

impl GlobalStatistics {
    /// Wire code.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Look up a statistic by wire code.
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    /// Look up a statistic by its upper-case engine name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    /// Whether the statistic can be emitted after every timestep.
    pub fn is_timestep_statistic(self) -> bool {
        use GlobalStatistics::*;
        matches!(
            self,
            TotalBurnArea
                | TotalPerimeter
                | ExteriorPerimeter
                | ActivePerimeter
                | TotalPerimeterChange
                | TotalPerimeterGrowthRate
                | ExteriorPerimeterChange
                | ExteriorPerimeterGrowthRate
                | ActivePerimeterChange
                | ActivePerimeterGrowthRate
                | AreaChange
                | AreaGrowthRate
                | NumVertices
                | NumActiveVertices
                | CumulativeActiveVertices
                | CumulativeVertices
                | NumFronts
                | NumActiveFronts
                | MaxRos
                | MaxCfb
                | MaxCfc
                | MaxSfc
                | MaxTfc
                | MaxFi
                | MaxFl
                | Ticks
                | ProcessingTime
                | GrowthTime
                | DateTime
                | ScenarioName
                | Hfi
                | Hcfb
        )
    }

    /// Whether the statistic can be exported as a grid file.
    pub fn is_grid_export_statistic(self) -> bool {
        use GlobalStatistics::*;
        matches!(
            self,
            Temperature
                | DewPoint
                | RelativeHumidity
                | WindDirection
                | WindSpeed
                | Precipitation
                | Ffmc
                | Isi
                | Fwi
                | Bui
                | MaxFi
                | MaxFl
                | MaxRos
                | MaxSfc
                | MaxCfc
                | MaxTfc
                | MaxCfb
                | Raz
                | BurnGrid
                | FireArrivalTime
                | Hros
                | Fros
                | Bros
                | Rss
                | ActivePerimeter
                | Burn
                | BurnPercentage
                | FireArrivalTimeMin
                | FireArrivalTimeMax
                | TotalFuelConsumed
                | SurfaceFuelConsumed
                | CrownFuelConsumed
                | RadiativePower
                | Hfi
                | Hcfb
        )
    }

    /// Whether the statistic can be a stats file column.
    pub fn is_stats_column(self) -> bool {
        self.code() <= MAX_STATS_COLUMN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_dense_and_ordered() {
        assert_eq!(GlobalStatistics::ALL.len(), 85);
        for (i, stat) in GlobalStatistics::ALL.iter().enumerate() {
            assert_eq!(stat.code(), i as i32);
        }
    }

    #[test]
    fn test_from_code_bounds() {
        assert_eq!(GlobalStatistics::from_code(0), Some(GlobalStatistics::DateTime));
        assert_eq!(GlobalStatistics::from_code(84), Some(GlobalStatistics::Burn));
        assert_eq!(GlobalStatistics::from_code(85), None);
        assert_eq!(GlobalStatistics::from_code(-1), None);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            GlobalStatistics::from_name("fire_arrival_time"),
            Some(GlobalStatistics::FireArrivalTime)
        );
        assert_eq!(GlobalStatistics::from_name("NOPE"), None);
    }

    #[test]
    fn test_whitelists_stay_distinct() {
        // Timestep only
        assert!(GlobalStatistics::Ticks.is_timestep_statistic());
        assert!(!GlobalStatistics::Ticks.is_grid_export_statistic());
        // Grid only
        assert!(GlobalStatistics::Temperature.is_grid_export_statistic());
        assert!(!GlobalStatistics::Temperature.is_timestep_statistic());
        // Both
        assert!(GlobalStatistics::Hfi.is_timestep_statistic());
        assert!(GlobalStatistics::Hfi.is_grid_export_statistic());
        // Neither
        assert!(!GlobalStatistics::MemoryUsedStart.is_timestep_statistic());
        assert!(!GlobalStatistics::MemoryUsedStart.is_grid_export_statistic());
    }

    #[test]
    fn test_whitelist_sizes() {
        let timestep = GlobalStatistics::ALL
            .iter()
            .filter(|s| s.is_timestep_statistic())
            .count();
        let grid = GlobalStatistics::ALL
            .iter()
            .filter(|s| s.is_grid_export_statistic())
            .count();
        assert_eq!(timestep, 32);
        assert_eq!(grid, 35);
    }

    #[test]
    fn test_stats_columns_stop_at_growth_time() {
        assert!(GlobalStatistics::GrowthTime.is_stats_column());
        assert!(!GlobalStatistics::Raz.is_stats_column());
    }
}
