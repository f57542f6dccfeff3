//! Airframe geometry extracted from a design tree.

use std::collections::BTreeMap;

/// Arm length used when the design tree does not specify one, in mm.
pub const DEFAULT_ARM_LENGTH: f32 = 400.0;

/// Arm count used when the hub type does not reveal one.
pub const DEFAULT_NUM_ARMS: u32 = 4;

/// Fuselage-mounted parts whose planar offsets are recorded in the design tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SensorSlot {
    Battery,
    Rpm,
    Autopilot,
    Current,
    Voltage,
    Gps,
    Vario,
}

impl SensorSlot {
    /// All slots in descriptor order.
    pub const ALL: [SensorSlot; 7] = [
        Self::Battery,
        Self::Rpm,
        Self::Autopilot,
        Self::Current,
        Self::Voltage,
        Self::Gps,
        Self::Vario,
    ];

    /// Key prefix of the `<key>X` / `<key>Y` fuselage fields.
    pub fn key(self) -> &'static str {
        match self {
            Self::Battery => "battery",
            Self::Rpm => "rpm",
            Self::Autopilot => "autoPilot",
            Self::Current => "current",
            Self::Voltage => "voltage",
            Self::Gps => "gps",
            Self::Vario => "vario",
        }
    }

    /// Slot of a component instance, matched on its name.
    ///
    /// `Battery` (but not `BatteryController`) and `Sensor_1` … `Sensor_6`
    /// map to slots in that order.
    pub fn for_instance(name: &str) -> Option<Self> {
        const NAMED: [(&str, SensorSlot); 7] = [
            ("Battery", SensorSlot::Battery),
            ("Sensor_1", SensorSlot::Rpm),
            ("Sensor_2", SensorSlot::Autopilot),
            ("Sensor_3", SensorSlot::Current),
            ("Sensor_4", SensorSlot::Voltage),
            ("Sensor_5", SensorSlot::Gps),
            ("Sensor_6", SensorSlot::Vario),
        ];

        if name.contains("BatteryController") {
            return None;
        }
        NAMED
            .iter()
            .find(|(pattern, _)| name.contains(pattern))
            .map(|(_, slot)| *slot)
    }
}

/// Fuselage dimensions in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fuselage {
    pub length: f32,
    pub horz_diameter: f32,
    pub vert_diameter: f32,
    pub floor_height: f32,
}

impl Default for Fuselage {
    fn default() -> Self {
        Self {
            length: 100.0,
            horz_diameter: 300.0,
            vert_diameter: 50.0,
            floor_height: 8.75,
        }
    }
}

/// Geometry attributes of one design.
#[derive(Debug, Clone, PartialEq)]
pub struct Airframe {
    hub_type: String,
    arm_length: f32,
    num_arms: u32,
    fuselage: Option<Fuselage>,
    sensor_offsets: BTreeMap<SensorSlot, (f32, f32)>,
}

impl Airframe {
    /// Creates an airframe for a hub type; the arm count is derived from the
    /// hub type name.
    pub fn new(hub_type: impl Into<String>, arm_length: Option<f32>) -> Self {
        let hub_type = hub_type.into();
        let num_arms = Self::arms_for_hub(&hub_type);
        Self {
            hub_type,
            arm_length: arm_length.unwrap_or(DEFAULT_ARM_LENGTH),
            num_arms,
            fuselage: None,
            sensor_offsets: BTreeMap::new(),
        }
    }

    /// Attaches fuselage dimensions and sensor offsets.
    pub fn with_fuselage(
        mut self,
        fuselage: Fuselage,
        sensor_offsets: BTreeMap<SensorSlot, (f32, f32)>,
    ) -> Self {
        self.fuselage = Some(fuselage);
        self.sensor_offsets = sensor_offsets;
        self
    }

    /// Arm count implied by a hub type name such as `Hub4` or `hexa_hub_6`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use uavplex_core::design::Airframe;
    /// assert_eq!(Airframe::arms_for_hub("Hub6"), 6);
    /// assert_eq!(Airframe::arms_for_hub("Unknown"), 4);
    /// ```
    pub fn arms_for_hub(hub_type: &str) -> u32 {
        ['4', '6', '8']
            .into_iter()
            .find(|digit| hub_type.contains(*digit))
            .and_then(|digit| digit.to_digit(10))
            .unwrap_or(DEFAULT_NUM_ARMS)
    }

    pub fn hub_type(&self) -> &str {
        &self.hub_type
    }

    pub fn arm_length(&self) -> f32 {
        self.arm_length
    }

    pub fn num_arms(&self) -> u32 {
        self.num_arms
    }

    pub fn fuselage(&self) -> Option<&Fuselage> {
        self.fuselage.as_ref()
    }

    /// Planar offset of a fuselage-mounted part.
    pub fn sensor_offset(&self, slot: SensorSlot) -> Option<(f32, f32)> {
        self.sensor_offsets.get(&slot).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arms_for_hub_priority() {
        assert_eq!(Airframe::arms_for_hub("Hub4"), 4);
        assert_eq!(Airframe::arms_for_hub("Hub8"), 8);
        // `4` wins when several digits appear
        assert_eq!(Airframe::arms_for_hub("Hub6_4"), 4);
    }

    #[test]
    fn test_default_arm_length() {
        let airframe = Airframe::new("Hub6", None);
        assert_eq!(airframe.arm_length(), DEFAULT_ARM_LENGTH);
        assert_eq!(airframe.num_arms(), 6);
        assert!(airframe.fuselage().is_none());
    }

    #[test]
    fn test_sensor_slot_for_instance() {
        assert_eq!(SensorSlot::for_instance("Battery_0"), Some(SensorSlot::Battery));
        assert_eq!(SensorSlot::for_instance("BatteryController"), None);
        assert_eq!(SensorSlot::for_instance("Sensor_5"), Some(SensorSlot::Gps));
        assert_eq!(SensorSlot::for_instance("Sensor_9"), None);
    }
}
