use std::fmt;

/// French public holidays, in calendar order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Holiday {
    NewYear,
    EasterMonday,
    LaborDay,
    VictoryDay,
    Ascension,
    WhitMonday,
    BastilleDay,
    Assumption,
    AllSaints,
    Armistice,
    Christmas,
}

impl Holiday {
    pub const ALL: [Holiday; 11] = [
        Holiday::NewYear,
        Holiday::EasterMonday,
        Holiday::LaborDay,
        Holiday::VictoryDay,
        Holiday::Ascension,
        Holiday::WhitMonday,
        Holiday::BastilleDay,
        Holiday::Assumption,
        Holiday::AllSaints,
        Holiday::Armistice,
        Holiday::Christmas,
    ];

    /// Stable identifier used in configuration files.
    pub fn keyword(self) -> &'static str {
        match self {
            Holiday::NewYear => "new_year",
            Holiday::EasterMonday => "easter_monday",
            Holiday::LaborDay => "labor_day",
            Holiday::VictoryDay => "victory_day",
            Holiday::Ascension => "ascension",
            Holiday::WhitMonday => "whit_monday",
            Holiday::BastilleDay => "bastille_day",
            Holiday::Assumption => "assumption",
            Holiday::AllSaints => "all_saints",
            Holiday::Armistice => "armistice",
            Holiday::Christmas => "christmas",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Holiday::NewYear => "New Year's Day",
            Holiday::EasterMonday => "Easter Monday",
            Holiday::LaborDay => "Labor Day",
            Holiday::VictoryDay => "Victory in Europe Day",
            Holiday::Ascension => "Ascension Day",
            Holiday::WhitMonday => "Whit Monday",
            Holiday::BastilleDay => "Bastille Day",
            Holiday::Assumption => "Assumption of Mary",
            Holiday::AllSaints => "All Saints' Day",
            Holiday::Armistice => "Armistice Day",
            Holiday::Christmas => "Christmas",
        }
    }

    /// False for the three holidays derived from Easter Sunday.
    pub fn is_fixed_date(self) -> bool {
        self.easter_offset().is_none()
    }

    /// Days after Easter Sunday, for the moveable holidays.
    pub fn easter_offset(self) -> Option<u64> {
        match self {
            Holiday::EasterMonday => Some(1),
            Holiday::Ascension => Some(39),
            Holiday::WhitMonday => Some(50),
            _ => None,
        }
    }

    /// `(month, day)` for fixed holidays.
    pub fn fixed_month_day(self) -> Option<(u32, u32)> {
        match self {
            Holiday::NewYear => Some((1, 1)),
            Holiday::LaborDay => Some((5, 1)),
            Holiday::VictoryDay => Some((5, 8)),
            Holiday::BastilleDay => Some((7, 14)),
            Holiday::Assumption => Some((8, 15)),
            Holiday::AllSaints => Some((11, 1)),
            Holiday::Armistice => Some((11, 11)),
            Holiday::Christmas => Some((12, 25)),
            Holiday::EasterMonday | Holiday::Ascension | Holiday::WhitMonday => None,
        }
    }

    /// Case-insensitive lookup by keyword.
    pub fn from_keyword(keyword: &str) -> Option<Holiday> {
        let keyword = keyword.to_lowercase();
        Holiday::ALL.into_iter().find(|h| h.keyword() == keyword)
    }
}

impl fmt::Display for Holiday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
