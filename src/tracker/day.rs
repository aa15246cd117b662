use std::{
    collections::HashMap,
    fmt::Display,
    ops::{Index, IndexMut},
};

use chrono::{Datelike, NaiveDate, Weekday};
use clap::ValueEnum;
use serde::{ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

/// One of the seven fixed slots of a tracked week. Slots are ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Monday=0 .. Sunday=6
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name used as a key in persisted documents.
    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    pub fn from_name(name: &str) -> Option<Day> {
        Self::ALL.into_iter().find(|day| day.name() == name)
    }

    /// Slot of a calendar date.
    pub fn of(date: NaiveDate) -> Day {
        date.weekday().into()
    }

    /// Default training focus shown for a day that has no note yet.
    pub fn suggested_focus(self) -> &'static str {
        match self {
            Day::Monday => "Chest",
            Day::Tuesday => "Back",
            Day::Wednesday => "Legs",
            Day::Thursday => "Core",
            Day::Friday => "Cardio",
            Day::Saturday => "Arms",
            Day::Sunday => "Rest",
        }
    }
}

impl From<Weekday> for Day {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
            Weekday::Sat => Day::Saturday,
            Weekday::Sun => Day::Sunday,
        }
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A value for each of the seven days. On disk this is an object keyed by day names, always
/// written in Monday..Sunday order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DayTable<T>([T; 7]);

impl<T> DayTable<T> {
    pub fn iter(&self) -> impl Iterator<Item = (Day, &T)> {
        Day::ALL.into_iter().zip(self.0.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T: Default> DayTable<T> {
    /// Builds a table from named entries. Days that are absent keep their default value and
    /// names that aren't days are dropped.
    pub fn from_named(entries: impl IntoIterator<Item = (String, T)>) -> Self {
        let mut table = DayTable::<T>::default();
        let mut present = [false; 7];
        for (name, value) in entries {
            match Day::from_name(&name) {
                Some(day) => {
                    table[day] = value;
                    present[day.index()] = true;
                }
                None => warn!("Dropping unknown day key {name:?}"),
            }
        }
        for day in Day::ALL.into_iter().filter(|day| !present[day.index()]) {
            warn!("Day {day} was missing, repaired with a default value");
        }
        table
    }
}

impl<T> Index<Day> for DayTable<T> {
    type Output = T;

    fn index(&self, day: Day) -> &Self::Output {
        &self.0[day.index()]
    }
}

impl<T> IndexMut<Day> for DayTable<T> {
    fn index_mut(&mut self, day: Day) -> &mut Self::Output {
        &mut self.0[day.index()]
    }
}

impl<T: Serialize> Serialize for DayTable<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(Day::ALL.len()))?;
        for (day, value) in self.iter() {
            map.serialize_entry(day.name(), value)?;
        }
        map.end()
    }
}

impl<'de, T> Deserialize<'de> for DayTable<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, T>::deserialize(deserializer)?;
        Ok(DayTable::from_named(raw))
    }
}
