//! The framework's trigger record and its decoding.
//!
//! On every invocation the framework reports which slots actually changed as
//! an ordered list of `prop_id` strings of the form `identifier.property`,
//! where a pattern-matched identifier is JSON-encoded
//! (e.g. `{"index":3,"type":"row"}.value`). An empty record means the
//! framework invoked the callback without any real change.

use pipe_trait::Pipe ;
use serde_json::{ Map, Value };



/// The ordered record of slots whose change caused an invocation.
#[derive( Clone, PartialEq, Debug, Default )]
pub struct Trigger {
	/// `identifier.property` strings, most relevant first.
	prop_ids: Vec<String>,
}

impl Trigger {

	/// Builds a trigger record from `prop_id` strings.
	#[inline]
	pub fn new( prop_ids: impl IntoIterator<Item = impl Into<String>> ) -> Self {
		Self { prop_ids: prop_ids.into_iter().map( Into::into ).collect() }
	}

	/// A record for an invocation where nothing actually changed.
	#[inline]
	pub fn none() -> Self { Self { prop_ids: Vec::with_capacity( 0 )}}

	/// Whether anything triggered.
	#[inline] pub fn is_empty( &self ) -> bool { self.prop_ids.is_empty() }

	/// All raw `prop_id` strings in order.
	#[inline] pub fn prop_ids( &self ) -> &[String] { &self.prop_ids }

	/// The first triggered entry's decoded identifier, if anything triggered.
	pub fn id( &self ) -> Option<TriggerId> {
		self.prop_ids.first()?
			.rsplit_once( '.' )
			.map_or( self.prop_ids[ 0 ].as_str(), |( id, _ )| id )
			.pipe( TriggerId::decode )
			.pipe( Some )
	}

	/// The first triggered entry's property name, if anything triggered.
	pub fn prop( &self ) -> Option<&str> {
		self.prop_ids.first()?
			.rsplit_once( '.' )
			.map(|( _, prop )| prop )
	}

}

/// A decoded trigger identifier.
///
/// Pattern-matched identifiers arrive JSON-encoded inside the `prop_id`
/// string; decoding recovers the original map. A string that merely looks
/// like JSON but fails to parse stays [`Plain`]( Self::Plain ).
#[derive( Clone, PartialEq, Debug )]
pub enum TriggerId {
	/// A plain string identifier.
	Plain( String ),
	/// A pattern-matched identifier, recovered from its JSON encoding.
	Pattern( Map<String, Value> ),
}

impl TriggerId {

	fn decode( raw: &str ) -> Self {
		if raw.starts_with( '{' ) {
			if let Ok( Value::Object( map )) = serde_json::from_str( raw ) {
				return Self::Pattern( map );
			}
		}
		Self::Plain( raw.to_string() )
	}

}

impl PartialEq<&str> for TriggerId {
	fn eq( &self, other: &&str ) -> bool {
		matches!( self, Self::Plain( id ) if id == other )
	}
}
impl PartialEq<TriggerId> for &str {
	fn eq( &self, other: &TriggerId ) -> bool { other == self }
}

impl std::fmt::Display for TriggerId {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
		match self {
			Self::Plain( id ) => write!( f, "{}", id ),
			Self::Pattern( map ) => write!( f, "{}", Value::Object( map.clone() )),
		}
	}
}
