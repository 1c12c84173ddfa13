//! Export unit codes.
//!
//! The engine identifies units by packed integer codes. Every field of
//! [`UnitSettings`] is optional; an unset unit is sent as `-1` so the engine
//! falls back to its own default.

macro_rules! unit_codes {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $code:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            /// Wire code.
            pub fn code(self) -> i32 {
                match self {
                    $($name::$variant => $code),*
                }
            }

            /// Look up a unit by wire code.
            pub fn from_code(code: i32) -> Option<Self> {
                Self::ALL.iter().copied().find(|u| u.code() == code)
            }
        }
    };
}

unit_codes! {
    /// Units of time.
    TimeUnit {
        Microsecond = 1572864,
        Millisecond = 1638400,
        Second = 1114112,
        Minute = 1179648,
        Hour = 1245184,
        Day = 1310720,
        Week = 1376256,
        Month = 1441792,
        Year = 1507328,
        Decade = 1703936,
        Century = 1769472,
    }
}

unit_codes! {
    /// Units of distance.
    DistanceUnit {
        Millimetre = 1,
        Centimetre = 2,
        Metre = 3,
        Kilometre = 4,
        Inch = 5,
        Foot = 6,
        Yard = 7,
        Chain = 8,
        Mile = 9,
        NauticalMile = 10,
        NauticalMileUk = 11,
    }
}

unit_codes! {
    /// Units of area.
    AreaUnit {
        SquareMillimetre = 256,
        SquareCentimetre = 257,
        SquareMetre = 258,
        Hectare = 259,
        SquareKilometre = 260,
        SquareInch = 261,
        SquareFoot = 262,
        SquareYard = 263,
        Acre = 264,
        SquareMile = 265,
    }
}

unit_codes! {
    /// Units of volume.
    VolumeUnit {
        CubicMillimetre = 512,
        CubicCentimetre = 513,
        Litre = 514,
        CubicMetre = 515,
        CubicKilometre = 516,
        CubicInch = 517,
        CubicFoot = 518,
        CubicYard = 519,
        CubicMile = 520,
        UkFluidOunce = 521,
        UkPint = 522,
        UkQuart = 523,
        UkGallon = 524,
        Bushel = 525,
        UsDram = 526,
        UsFluidOunce = 527,
        UsFluidPint = 528,
        UsFluidQuart = 529,
        UsGallon = 530,
        UsFluidBarrel = 531,
        UsDryPint = 532,
        UsDryQuart = 533,
        UsDryBarrel = 534,
    }
}

unit_codes! {
    /// Units of temperature.
    TemperatureUnit {
        Kelvin = 1024,
        Celsius = 1025,
        Fahrenheit = 1026,
        Rankine = 1027,
    }
}

unit_codes! {
    /// Units of mass.
    MassUnit {
        Milligram = 1536,
        Gram = 1537,
        Kilogram = 1538,
        Tonne = 1539,
        Ounce = 1540,
        Pound = 1541,
        ShortTon = 1542,
        Ton = 1543,
    }
}

unit_codes! {
    /// Units of energy.
    EnergyUnit {
        Joule = 1792,
        Kilojoule = 1802,
        Electronvolt = 1793,
        Erg = 1794,
        FootPound = 1795,
        Calorie = 1796,
        KilogramMetre = 1797,
        Btu = 1798,
        WattSecond = 1115911,
        WattHour = 1246983,
        KilowattSecond = 1115912,
        KilowattHour = 1246984,
        Therm = 1801,
    }
}

unit_codes! {
    /// Units of angle.
    AngleUnit {
        CartesianRadian = 1200,
        CompassRadian = 16778416,
        CartesianDegree = 33555632,
        CompassDegree = 50332848,
        CartesianArcsecond = 67110064,
        CompassArcsecond = 83887280,
    }
}

unit_codes! {
    /// Coordinate display formats.
    CoordinateUnit {
        Degree = 2048,
        DegreeMinute = 2049,
        DegreeMinuteSecond = 2050,
        Utm = 2051,
        RelativeDistance = 2052,
    }
}

/// Code sent for a unit that was not chosen.
pub const UNSET_UNIT: i32 = -1;

/// Distance over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VelocityUnit {
    pub distance: Option<DistanceUnit>,
    pub time: Option<TimeUnit>,
}

/// Energy over distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntensityUnit {
    pub energy: Option<EnergyUnit>,
    pub distance: Option<DistanceUnit>,
}

/// Mass over area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MassAreaUnit {
    pub mass: Option<MassUnit>,
    pub area: Option<AreaUnit>,
}

/// Units used when values are written to summary and statistics files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnitSettings {
    pub small_measure: Option<DistanceUnit>,
    pub small_distance: Option<DistanceUnit>,
    pub distance: Option<DistanceUnit>,
    pub alternate_distance: Option<DistanceUnit>,
    pub coordinate: Option<CoordinateUnit>,
    pub area: Option<AreaUnit>,
    pub volume: Option<VolumeUnit>,
    pub temperature: Option<TemperatureUnit>,
    pub mass: Option<MassUnit>,
    pub energy: Option<EnergyUnit>,
    pub angle: Option<AngleUnit>,
    pub velocity: VelocityUnit,
    pub alternate_velocity: VelocityUnit,
    pub intensity: IntensityUnit,
    pub mass_area: MassAreaUnit,
}

fn code_or_unset<T>(unit: Option<T>, code: impl Fn(T) -> i32) -> i32 {
    unit.map(code).unwrap_or(UNSET_UNIT)
}

impl UnitSettings {
    /// The nineteen codes in wire order.
    pub fn codes(&self) -> [i32; 19] {
        [
            code_or_unset(self.small_measure, DistanceUnit::code),
            code_or_unset(self.small_distance, DistanceUnit::code),
            code_or_unset(self.distance, DistanceUnit::code),
            code_or_unset(self.alternate_distance, DistanceUnit::code),
            code_or_unset(self.coordinate, CoordinateUnit::code),
            code_or_unset(self.area, AreaUnit::code),
            code_or_unset(self.volume, VolumeUnit::code),
            code_or_unset(self.temperature, TemperatureUnit::code),
            code_or_unset(self.mass, MassUnit::code),
            code_or_unset(self.energy, EnergyUnit::code),
            code_or_unset(self.angle, AngleUnit::code),
            code_or_unset(self.velocity.distance, DistanceUnit::code),
            code_or_unset(self.velocity.time, TimeUnit::code),
            code_or_unset(self.alternate_velocity.distance, DistanceUnit::code),
            code_or_unset(self.alternate_velocity.time, TimeUnit::code),
            code_or_unset(self.intensity.energy, EnergyUnit::code),
            code_or_unset(self.intensity.distance, DistanceUnit::code),
            code_or_unset(self.mass_area.mass, MassUnit::code),
            code_or_unset(self.mass_area.area, AreaUnit::code),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_all_unset() {
        assert_eq!(UnitSettings::default().codes(), [UNSET_UNIT; 19]);
    }

    #[test]
    fn test_codes_follow_field_order() {
        let settings = UnitSettings {
            small_measure: Some(DistanceUnit::Millimetre),
            coordinate: Some(CoordinateUnit::Utm),
            velocity: VelocityUnit {
                distance: Some(DistanceUnit::Kilometre),
                time: Some(TimeUnit::Hour),
            },
            mass_area: MassAreaUnit {
                mass: None,
                area: Some(AreaUnit::Hectare),
            },
            ..Default::default()
        };
        let codes = settings.codes();
        assert_eq!(codes[0], 1);
        assert_eq!(codes[4], 2051);
        assert_eq!(codes[11], 4);
        assert_eq!(codes[12], 1245184);
        assert_eq!(codes[17], -1);
        assert_eq!(codes[18], 259);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(EnergyUnit::from_code(1246984), Some(EnergyUnit::KilowattHour));
        assert_eq!(AngleUnit::from_code(50332848), Some(AngleUnit::CompassDegree));
        assert_eq!(MassUnit::from_code(3), None);
    }
}
