//! Slot identifiers, declared descriptors and the key normalizer.
//!
//! Every way a caller can name a slot - a declared [`SlotSpec`], a pattern
//! map, a `"id:prop"` string or a bare `"id"` - funnels through [`SlotRef`]
//! and is normalized to a single canonical `( key, property )` pair. No call
//! site ever branches on identifier shape itself.

use std::collections::HashMap ;

use serde_json::{ Map, Value };
use thiserror::Error ;



/// Logs a failure before handing it to the caller. Every error raised by the
/// normalizer and the binding context passes through here so that no failure
/// path is silent.
#[inline]
pub(crate) fn raise<E: std::fmt::Display>( error: E ) -> E {
	log::error!( "{}", error );
	error
}

/// Errors produced while normalizing a slot identifier to a canonical
/// `( key, property )` pair.
#[derive( Error, Debug )]
pub enum SlotError {
	/// A textual identifier used the `key:property` form with the wrong number of tokens.
	#[error( "[{name}] Key '{key}' should only have 2 tokens" )]
	MalformedText { name: String, key: String },
	/// A pattern identifier carried no `"type"` discriminator field.
	#[error( "[{name}] Unable to find 'type' in pattern key '{key}'" )]
	MissingDiscriminator { name: String, key: String },
	/// The value used as an identifier is not a slot spec, pattern map or string.
	#[error( "Key '{key}' is not a slot spec, pattern map or string" )]
	UnsupportedKind { key: String },
	/// The key is absent from every searched namespace.
	#[error( "[{name}] Key '{key}' does not exist" )]
	UnknownKey { name: String, key: String },
	/// The key exists with several properties and none was given explicitly.
	#[error( "[{name}] Key '{key}' has multiple properties, pass one explicitly (valid: {valid})" )]
	AmbiguousProperty { name: String, key: String, valid: String },
	/// No property could be derived, given explicitly or looked up.
	#[error( "[{name}] Key '{key}' has no resolvable property (valid: {valid})" )]
	MissingProperty { name: String, key: String, valid: String },
}



/// Which namespace a declared slot belongs to.
///
/// The external framework delivers input and state values positionally
/// (inputs first, then states) and expects output values back positionally
/// in declaration order.
#[derive( Copy, Clone, Eq, PartialEq, Hash, Debug )]
pub enum Role {
	/// A slot whose change triggers the callback. Read-only inside it.
	Input,
	/// A slot read by the callback without triggering it. Read-only inside it.
	State,
	/// A slot the callback writes. Returned positionally to the framework.
	Output,
}

impl std::fmt::Display for Role {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
		match self {
			Self::Input => write!( f, "input" ),
			Self::State => write!( f, "state" ),
			Self::Output => write!( f, "output" ),
		}
	}
}

/// A slot identifier as declared by the UI layer.
///
/// Most slots are named by a plain string. Pattern identifiers name a whole
/// family of dynamically created slots; they are JSON maps carrying a
/// `"type"` discriminator which serves as the family's canonical key.
#[derive( Clone, PartialEq, Debug )]
pub enum SlotId {
	/// A single slot with a fixed string identifier.
	Plain( String ),
	/// A pattern-matched family, keyed by its `"type"` discriminator.
	Pattern( Map<String, Value> ),
}

impl SlotId {

	/// The canonical key: the identifier itself, or the pattern's `"type"`
	/// discriminator.
	///
	/// # Errors
	/// Returns [`SlotError::MissingDiscriminator`] for a pattern map without a
	/// string `"type"` field.
	pub fn key( &self, name: &str ) -> Result<String, SlotError> {
		match self {
			Self::Plain( id ) => Ok( id.clone() ),
			Self::Pattern( map ) => match map.get( "type" ) {
				Some( Value::String( discriminator )) => Ok( discriminator.clone() ),
				_ => Err( raise( SlotError::MissingDiscriminator {
					name: name.to_string(),
					key: Value::Object( map.clone() ).to_string(),
				})),
			},
		}
	}

}

impl From<&str> for SlotId {
	fn from( id: &str ) -> Self { Self::Plain( id.to_string() )}
}
impl From<String> for SlotId {
	fn from( id: String ) -> Self { Self::Plain( id )}
}
impl From<Map<String, Value>> for SlotId {
	fn from( map: Map<String, Value> ) -> Self { Self::Pattern( map )}
}

/// A declared slot descriptor: identifier, property and namespace role.
///
/// Produced once per callback at registration time and immutable afterwards.
/// The declaration order of inputs and states fixes the positional layout of
/// the flat argument list; the declaration order of outputs fixes the
/// positional layout of the response.
#[derive( Clone, PartialEq, Debug )]
pub struct SlotSpec {
	/// The slot's identifier (plain or pattern).
	id: SlotId,
	/// Which attribute of the slot this descriptor binds (e.g. `n_clicks`, `value`).
	property: String,
	/// Which namespace the slot belongs to.
	role: Role,
}

impl SlotSpec {

	/// Declares an input slot.
	#[inline]
	pub fn input( id: impl Into<SlotId>, property: impl Into<String> ) -> Self {
		Self { id: id.into(), property: property.into(), role: Role::Input }
	}

	/// Declares a state slot.
	#[inline]
	pub fn state( id: impl Into<SlotId>, property: impl Into<String> ) -> Self {
		Self { id: id.into(), property: property.into(), role: Role::State }
	}

	/// Declares an output slot.
	#[inline]
	pub fn output( id: impl Into<SlotId>, property: impl Into<String> ) -> Self {
		Self { id: id.into(), property: property.into(), role: Role::Output }
	}

	/// The slot's identifier.
	#[inline] pub fn id( &self ) -> &SlotId { &self.id }

	/// The bound property name.
	#[inline] pub fn property( &self ) -> &str { &self.property }

	/// The namespace role.
	#[inline] pub fn role( &self ) -> Role { self.role }

	/// The canonical `( key, property )` pair for this declaration.
	pub(crate) fn canonical( &self, name: &str ) -> Result<( String, String ), SlotError> {
		Ok(( self.id.key( name )?, self.property.clone() ))
	}

}

/// Normalizes a slot reference into its canonical `( key, property )` pair
/// without namespace context.
///
/// The property must be derivable from the reference itself (a declared
/// spec, `"id:prop"` text) or supplied as `explicit`. Pure, except for
/// diagnostic logging on failure paths. Normalizing an already canonical
/// pair returns it unchanged.
///
/// # Errors
/// See [`SlotError`]; failures name the callback (`name`) and the offending
/// identifier.
pub fn normalize(
	slot: impl Into<SlotRef>,
	explicit: Option<&str>,
	name: &str,
) -> Result<( String, String ), SlotError> {
	slot.into().resolve::<Value>( explicit, &[], name )
}

/// Any accepted shape for naming a slot at a call site.
///
/// [`BindingContext`]( crate::BindingContext ) accessors take
/// `impl Into<SlotRef>` so callers can pass a declared [`SlotSpec`], a
/// pattern map, `"id:prop"` or a bare `"id"` interchangeably.
#[derive( Clone, PartialEq, Debug )]
pub enum SlotRef {
	/// A typed declared descriptor; key and property are both carried.
	Spec( SlotSpec ),
	/// A pattern map; the key is its `"type"` discriminator.
	Pattern( Map<String, Value> ),
	/// `"id"` or `"id:prop"` text.
	Text( String ),
}

impl From<&str> for SlotRef {
	fn from( text: &str ) -> Self { Self::Text( text.to_string() )}
}
impl From<String> for SlotRef {
	fn from( text: String ) -> Self { Self::Text( text )}
}
impl From<SlotSpec> for SlotRef {
	fn from( spec: SlotSpec ) -> Self { Self::Spec( spec )}
}
impl From<&SlotSpec> for SlotRef {
	fn from( spec: &SlotSpec ) -> Self { Self::Spec( spec.clone() )}
}
impl From<Map<String, Value>> for SlotRef {
	fn from( map: Map<String, Value> ) -> Self { Self::Pattern( map )}
}

impl TryFrom<&Value> for SlotRef {
	type Error = SlotError ;

	/// Accepts JSON strings and objects; everything else is an
	/// identifier-kind error.
	fn try_from( value: &Value ) -> Result<Self, SlotError> {
		match value {
			Value::String( text ) => Ok( Self::Text( text.clone() )),
			Value::Object( map ) => Ok( Self::Pattern( map.clone() )),
			other => Err( raise( SlotError::UnsupportedKind { key: other.to_string() })),
		}
	}
}

impl SlotRef {

	/// Normalizes this reference into a canonical `( key, property )` pair.
	///
	/// - A [`Spec`]( Self::Spec ) carries both parts already.
	/// - A [`Pattern`]( Self::Pattern ) keys on its `"type"` discriminator.
	/// - Text containing exactly one `:` splits into `( key, property )`;
	///   more than one separator is malformed.
	/// - `explicit` overrides any property derived so far.
	/// - If the property is still unknown, `search` namespaces are consulted
	///   in order: the key must exist in one of them with exactly one
	///   property, which is adopted. Absence and ambiguity are errors.
	///
	/// Normalizing an already canonical pair returns it unchanged.
	///
	/// # Errors
	/// See [`SlotError`]; every failure names the callback (`name`) and the
	/// offending identifier.
	pub(crate) fn resolve<V>(
		&self,
		explicit: Option<&str>,
		search: &[ &HashMap<String, HashMap<String, V>> ],
		name: &str,
	) -> Result<( String, String ), SlotError> {

		let ( key, mut property ) = match self {
			Self::Spec( spec ) => {
				let ( key, property ) = spec.canonical( name )?;
				( key, Some( property ))
			},
			Self::Pattern( map ) => ( SlotId::Pattern( map.clone() ).key( name )?, None ),
			Self::Text( text ) => match text.split( ':' ).collect::<Vec<_>>().as_slice() {
				[ key ] => (( *key ).to_string(), None ),
				[ key, property ] => (( *key ).to_string(), Some(( *property ).to_string() )),
				_ => return Err( raise( SlotError::MalformedText {
					name: name.to_string(),
					key: text.clone(),
				})),
			},
		};

		if let Some( explicit ) = explicit {
			property = Some( explicit.to_string() );
		}

		match property {
			Some( property ) => Ok(( key, property )),
			None if search.is_empty() => Err( raise( SlotError::MissingProperty {
				name: name.to_string(),
				key,
				valid: String::new(),
			})),
			None => {
				let known = search.iter().find_map(| namespace | namespace.get( &key ));
				match known {
					None => Err( raise( SlotError::UnknownKey { name: name.to_string(), key })),
					Some( properties ) if properties.len() == 1 => {
						let property = properties.keys().next().cloned().unwrap_or_default();
						Ok(( key, property ))
					},
					Some( properties ) => Err( raise( SlotError::AmbiguousProperty {
						name: name.to_string(),
						key,
						valid: properties.keys().cloned().collect::<Vec<_>>().join( ", " ),
					})),
				}
			},
		}

	}

}
