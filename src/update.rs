//! Output value sentinel and framework response types.

use serde_json::Value ;



/// The value of a single output slot.
///
/// Output slots start as [`Keep`]( Self::Keep ), the framework's "leave this
/// slot as-is" sentinel. `Keep` is a distinct variant: it is never conflated
/// with an absent slot or with an explicitly written [`Value::Null`].
#[derive( Clone, PartialEq, Debug, Default )]
pub enum Update {
	/// The slot was not written; the framework leaves it unchanged.
	#[default] Keep,
	/// The slot was written with this value (which may be `Value::Null`).
	Value( Value ),
}

impl Update {
	/// Whether the slot was written.
	#[inline] pub fn is_set( &self ) -> bool { matches!( self, Self::Value( _ ))}
}

impl From<Value> for Update {
	fn from( value: Value ) -> Self { Self::Value( value )}
}

impl std::fmt::Display for Update {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
		match self {
			Self::Keep => write!( f, "<keep>" ),
			Self::Value( value ) => write!( f, "{}", value ),
		}
	}
}

/// The positional result handed back to the framework after an invocation.
///
/// Mirrors the framework's output-arity convention: a callback declaring a
/// single output returns the bare value, a callback declaring several
/// returns them as a sequence in declaration order, and a failed or
/// no-change invocation returns [`KeepAll`]( Self::KeepAll ).
#[derive( Clone, PartialEq, Debug )]
pub enum Response {
	/// Leave every output slot as-is (failure or no actual change).
	KeepAll,
	/// The single declared output, unwrapped.
	Single( Update ),
	/// All declared outputs in declaration order.
	Many( Vec<Update> ),
}

/// What a business-logic function may hand back to the invocation wrapper.
///
/// - [`Unchanged`]( Self::Unchanged ): the function wrote outputs through
///   [`BindingContext::set`]( crate::BindingContext::set ) and friends (or
///   chose to write nothing).
/// - [`One`]( Self::One ): a single value, assigned to the sole declared
///   output.
/// - [`Group`]( Self::Group ): one value per declared output, assigned
///   positionally in declaration order.
#[derive( Clone, PartialEq, Debug, Default )]
pub enum LogicValue {
	/// Outputs were written explicitly, or intentionally left alone.
	#[default] Unchanged,
	/// A single return value for a single-output callback.
	One( Value ),
	/// One value per declared output, in declaration order.
	Group( Vec<Value> ),
}

impl From<Value> for LogicValue {
	fn from( value: Value ) -> Self { Self::One( value )}
}
impl From<Vec<Value>> for LogicValue {
	fn from( values: Vec<Value> ) -> Self { Self::Group( values )}
}
impl From<()> for LogicValue {
	fn from( _: () ) -> Self { Self::Unchanged }
}
