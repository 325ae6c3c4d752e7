//! Menu items

use crate::config::Field;

/// Entries of the settings menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuItem {
    Mode,
    ThermostatTarget,
    FreezeTime,
    RestTime,
    StopTemp,
    ResumeTemp,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 7] = [
        MenuItem::Mode,
        MenuItem::ThermostatTarget,
        MenuItem::FreezeTime,
        MenuItem::RestTime,
        MenuItem::StopTemp,
        MenuItem::ResumeTemp,
        MenuItem::Exit,
    ];

    pub const COUNT: u8 = Self::ALL.len() as u8;

    /// Item at a selection index, wrapping
    pub fn from_index(index: u8) -> MenuItem {
        Self::ALL[(index % Self::COUNT) as usize]
    }

    pub fn index(self) -> u8 {
        match self {
            MenuItem::Mode => 0,
            MenuItem::ThermostatTarget => 1,
            MenuItem::FreezeTime => 2,
            MenuItem::RestTime => 3,
            MenuItem::StopTemp => 4,
            MenuItem::ResumeTemp => 5,
            MenuItem::Exit => 6,
        }
    }

    /// Configuration field edited by this item
    pub fn field(self) -> Option<Field> {
        match self {
            MenuItem::Mode => Some(Field::Mode),
            MenuItem::ThermostatTarget => Some(Field::ThermostatTarget),
            MenuItem::FreezeTime => Some(Field::FreezeDuration),
            MenuItem::RestTime => Some(Field::RestDuration),
            MenuItem::StopTemp => Some(Field::StopTemp),
            MenuItem::ResumeTemp => Some(Field::ResumeTemp),
            MenuItem::Exit => None,
        }
    }

    /// Menu item that edits `field`
    pub fn for_field(field: Field) -> MenuItem {
        match field {
            Field::Mode => MenuItem::Mode,
            Field::ThermostatTarget => MenuItem::ThermostatTarget,
            Field::FreezeDuration => MenuItem::FreezeTime,
            Field::RestDuration => MenuItem::RestTime,
            Field::StopTemp => MenuItem::StopTemp,
            Field::ResumeTemp => MenuItem::ResumeTemp,
        }
    }

    pub fn label(self) -> &'static str {
        match self.field() {
            Some(field) => field.label(),
            None => "Exit",
        }
    }
}
