//! Declarative macros for the event tables

/// Define an event enum together with its counter assignment declarations
///
/// Every variant carries the framework's event name, the counter group the
/// event is wired to and the raw event select code. A duplicated variant is a
/// compile error.
///
/// # Example
/// ```ignore
/// pmc_event_table! {
///     pub enum TinyEvent {
///         Cycles => ("CYCLES", Any, 0),
///         ItlbMisses => ("ITLB_MISSES", Secondary, 4),
///     }
/// }
///
/// assert_eq!(TinyEvent::Cycles.name(), "CYCLES");
/// assert_eq!(TinyEvent::all().len(), 2);
/// assert_eq!(TinyEvent::DECLARATIONS[1].2, 4);
/// ```
///
/// Expands to:
/// - An enum with Debug, Clone, Copy, PartialEq, Eq, Hash derives
/// - A `name(&self) -> &'static str` method
/// - An `all() -> &'static [Self]` method in declaration order
/// - A `DECLARATIONS` slice of `(event, group, code)` triples
#[macro_export]
macro_rules! pmc_event_table {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => ($str:literal, $group:ident, $code:expr)),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant,)*
        }

        impl $name {
            pub const DECLARATIONS: &'static [($name, $crate::counters::events::CounterGroup, u8)] = &[
                $(($name::$variant, $crate::counters::events::CounterGroup::$group, $code),)*
            ];

            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $str,)*
                }
            }

            pub fn all() -> &'static [$name] {
                &[$($name::$variant,)*]
            }
        }
    };
}
