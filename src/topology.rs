//! Declared component tree walk.
//!
//! [`discover`] turns the UI layer's declared component tree into a flat
//! identifier → component-kind map used for registration-time validation
//! and diagnostics. The walk is pure: it builds and returns a fresh map and
//! never mutates the tree.

use std::collections::HashMap ;

use thiserror::Error ;



/// Error that can occur while walking a declared component tree.
#[derive( Error, Debug )]
pub enum TopologyError {
	/// The same identifier appears on two different nodes.
	#[error( "Duplicate component id '{id}' (kinds '{first}' and '{second}')" )]
	DuplicateId { id: String, first: String, second: String },
	/// The walk produced no identifiers at all, so nothing can be validated.
	#[error( "Component tree contains no identified components" )]
	Empty,
}

/// The conventional kind string of navigation/location components.
///
/// A component of this kind exposes the browser location as `pathname`,
/// `search` and `hash` properties; [`register`]( crate::register ) wires
/// those up as states automatically when exactly one such component exists.
pub const LOCATION_KIND: &str = "Location" ;

/// A node of the declared UI component tree.
///
/// Nodes optionally carry an identifier and a kind, and zero or more
/// children. Only identified nodes appear in the discovered topology; the
/// rest are structural.
#[derive( Clone, PartialEq, Debug, Default )]
pub struct Component {
	id: Option<String>,
	kind: Option<String>,
	children: Vec<Component>,
}

impl Component {

	/// Creates an anonymous structural node.
	#[inline]
	pub fn new( kind: impl Into<String> ) -> Self {
		Self { id: None, kind: Some( kind.into() ), children: Vec::new() }
	}

	/// Creates an identified node.
	#[inline]
	pub fn with_id( kind: impl Into<String>, id: impl Into<String> ) -> Self {
		Self { id: Some( id.into() ), kind: Some( kind.into() ), children: Vec::new() }
	}

	/// Appends a single child node.
	#[inline]
	pub fn child( mut self, child: Component ) -> Self {
		self.children.push( child );
		self
	}

	/// Appends an ordered sequence of child nodes.
	#[inline]
	pub fn children( mut self, children: impl IntoIterator<Item = Component> ) -> Self {
		self.children.extend( children );
		self
	}

	/// The node's identifier, if any.
	#[inline] pub fn id( &self ) -> Option<&str> { self.id.as_deref() }

	/// The node's component kind, if any.
	#[inline] pub fn kind( &self ) -> Option<&str> { self.kind.as_deref() }

}

/// Walks a declared component tree into an identifier → kind map.
///
/// # Errors
/// - [`TopologyError::DuplicateId`] if the same identifier appears on two
///   nodes, naming both kinds. Unique identifiers are a structural invariant
///   of the declaration layer; this walk double-checks it.
/// - [`TopologyError::Empty`] if no node carries an identifier.
pub fn discover( root: &Component ) -> Result<HashMap<String, String>, TopologyError> {
	let topology = walk( root, HashMap::new() )?;
	match topology.is_empty() {
		true => Err( TopologyError::Empty ),
		false => Ok( topology ),
	}
}

fn walk(
	node: &Component,
	mut found: HashMap<String, String>,
) -> Result<HashMap<String, String>, TopologyError> {

	if let Some( id ) = node.id() {
		let kind = node.kind().unwrap_or( "unknown" ).to_string();
		if let Some( first ) = found.insert( id.to_string(), kind.clone() ) {
			return Err( TopologyError::DuplicateId {
				id: id.to_string(),
				first,
				second: kind,
			});
		}
	}

	node.children.iter().try_fold( found, |acc, child| walk( child, acc ))
}
