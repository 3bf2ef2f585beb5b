//! Generic register abstractions for type-safe CP0 programming

/// Trait for register layouts that can be converted to/from raw register values
///
/// CP0 performance registers are 32 bits wide on every MIPS32 core, so the
/// raw representation is a `u32`.
///
/// # Example
///
/// ```ignore
/// use mips74k_raw::register::RegisterLayout;
///
/// #[derive(Debug, Default)]
/// struct MyControl {
///     enable: bool,
///     event: u8,
/// }
///
/// impl RegisterLayout for MyControl {
///     fn to_reg_value(&self) -> u32 {
///         (if self.enable { 1 } else { 0 }) | ((self.event as u32) << 5)
///     }
///
///     fn from_reg_value(value: u32) -> Self {
///         Self {
///             enable: (value & 1) != 0,
///             event: ((value >> 5) & 0x7F) as u8,
///         }
///     }
/// }
/// ```
pub trait RegisterLayout: Sized {
    /// Convert this register layout to a raw register value
    fn to_reg_value(&self) -> u32;

    /// Parse a raw register value into this register layout
    fn from_reg_value(value: u32) -> Self;

    /// Validate that the register fields are within acceptable ranges
    ///
    /// Returns `Ok(())` if valid, or an error message if invalid.
    fn validate(&self) -> Result<(), &'static str> {
        Ok(())
    }
}
