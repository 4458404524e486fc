//! GPIO / peripheral pin assignments for the terrarium controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Sensor bus (dedicated I²C controller 0)
// ---------------------------------------------------------------------------

/// I²C data line shared by the AHT and TSL2561.
pub const SENSORS_SDA_GPIO: i32 = 21;
/// I²C clock line shared by the AHT and TSL2561.
pub const SENSORS_SCL_GPIO: i32 = 47;

// ---------------------------------------------------------------------------
// Outputs (active HIGH)
// ---------------------------------------------------------------------------

/// Relay for the supplemental light source.
pub const LIGHT_GPIO: i32 = 4;
/// Ventilation motor A driver enable.
pub const MOTOR_A_GPIO: i32 = 5;
/// Ventilation motor B driver enable.
pub const MOTOR_B_GPIO: i32 = 6;
