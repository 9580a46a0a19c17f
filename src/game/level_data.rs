//! Per-level speed, Elroy, power and intermission settings.

/// One row of the level table. Speeds are percentages of [`BASE_SPEED`](crate::constants::BASE_SPEED).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelData {
    pub pac_speed: u8,
    pub ghost_speed: u8,
    pub ghost_tunnel_speed: u8,
    pub elroy1_dots_left: u8,
    pub elroy1_speed: u8,
    pub elroy2_dots_left: u8,
    pub elroy2_speed: u8,
    pub pac_powered_speed: u8,
    pub ghost_frightened_speed: u8,
    pub power_seconds: u8,
    pub num_flashes: u8,
    /// Intermission played after this level, 0 for none.
    pub intermission: u8,
}

const fn row(values: [u8; 12]) -> LevelData {
    LevelData {
        pac_speed: values[0],
        ghost_speed: values[1],
        ghost_tunnel_speed: values[2],
        elroy1_dots_left: values[3],
        elroy1_speed: values[4],
        elroy2_dots_left: values[5],
        elroy2_speed: values[6],
        pac_powered_speed: values[7],
        ghost_frightened_speed: values[8],
        power_seconds: values[9],
        num_flashes: values[10],
        intermission: values[11],
    }
}

#[rustfmt::skip]
pub const LEVEL_TABLE: [LevelData; 21] = [
    /* 1*/ row([ 80, 75, 40,  20,  80, 10,  85,  90, 50, 6, 5, 0]),
    /* 2*/ row([ 90, 85, 45,  30,  90, 15,  95,  95, 55, 5, 5, 1]),
    /* 3*/ row([ 90, 85, 45,  40,  90, 20,  95,  95, 55, 4, 5, 0]),
    /* 4*/ row([ 90, 85, 45,  40,  90, 20,  95,  95, 55, 3, 5, 0]),
    /* 5*/ row([100, 95, 50,  40, 100, 20, 105, 100, 60, 2, 5, 2]),
    /* 6*/ row([100, 95, 50,  50, 100, 25, 105, 100, 60, 5, 5, 0]),
    /* 7*/ row([100, 95, 50,  50, 100, 25, 105, 100, 60, 2, 5, 0]),
    /* 8*/ row([100, 95, 50,  50, 100, 25, 105, 100, 60, 2, 5, 0]),
    /* 9*/ row([100, 95, 50,  60, 100, 30, 105, 100, 60, 1, 3, 3]),
    /*10*/ row([100, 95, 50,  60, 100, 30, 105, 100, 60, 5, 5, 0]),
    /*11*/ row([100, 95, 50,  60, 100, 30, 105, 100, 60, 2, 5, 0]),
    /*12*/ row([100, 95, 50,  80, 100, 40, 105, 100, 60, 1, 3, 0]),
    /*13*/ row([100, 95, 50,  80, 100, 40, 105, 100, 60, 1, 3, 3]),
    /*14*/ row([100, 95, 50,  80, 100, 40, 105, 100, 60, 3, 5, 0]),
    /*15*/ row([100, 95, 50, 100, 100, 50, 105, 100, 60, 1, 3, 0]),
    /*16*/ row([100, 95, 50, 100, 100, 50, 105, 100, 60, 1, 3, 0]),
    /*17*/ row([100, 95, 50, 100, 100, 50, 105,   0,  0, 0, 0, 3]),
    /*18*/ row([100, 95, 50, 100, 100, 50, 105, 100, 60, 1, 3, 0]),
    /*19*/ row([100, 95, 50, 120, 100, 60, 105,   0,  0, 0, 0, 0]),
    /*20*/ row([100, 95, 50, 120, 100, 60, 105,   0,  0, 0, 0, 0]),
    /*21*/ row([ 90, 95, 50, 120, 100, 60, 105,   0,  0, 0, 0, 0]),
];

impl LevelData {
    /// The row for a 1-based level number; levels past the table reuse its last row.
    pub fn for_level(level: u32) -> LevelData {
        let index = (level.max(1) as usize - 1).min(LEVEL_TABLE.len() - 1);
        LEVEL_TABLE[index]
    }

    pub fn power_ticks(&self) -> u32 {
        self.power_seconds as u32 * crate::constants::TICKS_PER_SECOND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_level() {
        let data = LevelData::for_level(1);
        assert_eq!(data.pac_speed, 80);
        assert_eq!(data.power_ticks(), 360);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(LevelData::for_level(21), LevelData::for_level(250));
        assert_eq!(LevelData::for_level(0), LevelData::for_level(1));
    }

    #[test]
    fn test_no_power_on_level_17() {
        assert_eq!(LevelData::for_level(17).power_ticks(), 0);
    }
}
