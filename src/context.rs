//! The per-invocation binding context.
//!
//! A [`BindingContext`] is built fresh for every invocation from the
//! immutable declared descriptors and the flat positional value list the
//! framework delivered for that event. It reconstructs the three named
//! namespaces (inputs, states, outputs), gives business logic get/set access
//! by slot name, and marshals the written outputs back into the positional
//! declaration order the framework expects. It is owned by a single
//! invocation and discarded when it completes.

use std::collections::HashMap ;
use std::time::{ Duration, Instant };

use serde_json::map::Entry ;
use serde_json::{ Map, Value };
use thiserror::Error ;

use crate::slot::{ raise, Role, SlotError, SlotRef, SlotSpec };
use crate::trigger::{ Trigger, TriggerId };
use crate::update::{ Response, Update };



/// Errors that can occur constructing or operating a [`BindingContext`].
#[derive( Error, Debug )]
pub enum ContextError {
	/// A declared slot failed to normalize; `position` is 1-based within its role.
	#[error( "[{name}] Unable to process {role} ({position}): {source}" )]
	InvalidSlot { name: String, role: Role, position: usize, source: SlotError },
	/// The same key and property appear in both the input and state namespaces.
	#[error( "[{name}] input and state both have key='{key}' and property='{property}'" )]
	Collision { name: String, key: String, property: String },
	/// The flat argument list does not match the declared input + state count.
	#[error( "[{name}] Expected {expected} positional arguments, received {received}" )]
	ArgumentCount { name: String, expected: usize, received: usize },
	/// `set_list` received a value count different from the declared output count.
	#[error( "[{name}] Expected {expected} output values, received {received}" )]
	OutputArity { name: String, expected: usize, received: usize },
	/// A `set` target does not exist in the output namespace.
	#[error( "[{name}] Key '{key}' Prop '{property}' does not exist in outputs" )]
	UnknownOutput { name: String, key: String, property: String },
	/// An ordered output entry vanished from the output namespace. Internal
	/// consistency failure, not a user error.
	#[error( "[{name}] Key '{key}' Prop '{property}' missing from outputs (internal)" )]
	MissingOutput { name: String, key: String, property: String },
	/// A slot reference failed to normalize.
	#[error( transparent )]
	Slot( #[from] SlotError ),
}

/// Per-callback metadata carried into every [`BindingContext`].
#[derive( Clone, PartialEq, Debug )]
pub struct ContextConfig {
	/// Diagnostic label used in every log line and error message.
	pub name: String,
	/// Enables verbose per-invocation logging.
	pub debug: bool,
	/// Forces the debug rendering into the completion log line.
	pub log_on_exit: bool,
	/// Identifier of a location component whose `pathname`/`search`/`hash`
	/// states should be parsed into [`Location`].
	pub location: Option<String>,
	/// Source location of the registration call, for diagnostics.
	pub defined_at: Option<&'static std::panic::Location<'static>>,
}

impl Default for ContextConfig {
	fn default() -> Self {
		Self {
			name: "default".to_string(),
			debug: false,
			log_on_exit: false,
			location: None,
			defined_at: None,
		}
	}
}

impl ContextConfig {

	/// Config with the given diagnostic name and everything else default.
	#[inline]
	pub fn named( name: impl Into<String> ) -> Self {
		Self { name: name.into(), ..Self::default() }
	}

}

/// The parsed navigation location, when a location slot is configured.
#[derive( Clone, PartialEq, Debug, Default )]
pub struct Location {
	/// The path portion, e.g. `/reports/42`.
	pub path: String,
	/// The decoded query parameters. Repeated keys collect into an array,
	/// single keys stay scalar.
	pub query: Map<String, Value>,
	/// The fragment portion without its leading `#`.
	pub hash: String,
}

/// A named, per-invocation view over the framework's flat argument list.
pub struct BindingContext {
	config: ContextConfig,
	trigger: Trigger,
	inputs: HashMap<String, HashMap<String, Value>>,
	states: HashMap<String, HashMap<String, Value>>,
	outputs: HashMap<String, HashMap<String, Update>>,
	/// Declaration order of outputs; fixes the positional response layout
	/// independent of the output namespace's own iteration order.
	output_order: Vec<( String, String )>,
	location: Option<Location>,
	started: Instant,
}

impl BindingContext {

	/// Builds a context from declared descriptors and the flat argument list.
	///
	/// The framework delivers arguments as `[ ...inputs, ...states ]` in
	/// declaration order; the list is split at the declared input count.
	/// Output slots are initialized to [`Update::Keep`] and their declaration
	/// order is recorded for the positional response.
	///
	/// # Errors
	/// - [`ContextError::ArgumentCount`] if the argument list length is not
	///   the declared input + state count.
	/// - [`ContextError::InvalidSlot`] if any declared slot fails to
	///   normalize, naming its 1-based position.
	/// - [`ContextError::Collision`] if a key + property pair appears in both
	///   the input and state namespaces.
	pub fn new(
		inputs: &[SlotSpec],
		states: &[SlotSpec],
		outputs: &[SlotSpec],
		args: Vec<Value>,
		trigger: Trigger,
		config: ContextConfig,
	) -> Result<Self, ContextError> {

		let started = Instant::now();
		let expected = inputs.len() + states.len();
		if args.len() != expected {
			return Err( raise( ContextError::ArgumentCount {
				name: config.name.clone(),
				expected,
				received: args.len(),
			}));
		}

		let mut args = args.into_iter();
		let input_map = Self::bind_role( inputs, args.by_ref().take( inputs.len() ), &config.name )?;
		let state_map = Self::bind_role( states, args, &config.name )?;

		// Same key + property in both namespaces would leave two sources of
		// truth for one value.
		for ( key, properties ) in &input_map {
			let Some( shadowed ) = state_map.get( key ) else { continue };
			if let Some( property ) = properties.keys().find(| p | shadowed.contains_key( *p )) {
				return Err( raise( ContextError::Collision {
					name: config.name.clone(),
					key: key.clone(),
					property: property.clone(),
				}));
			}
		}

		let mut output_map: HashMap<String, HashMap<String, Update>> = HashMap::new();
		let mut output_order = Vec::with_capacity( outputs.len() );
		for ( position, spec ) in outputs.iter().enumerate() {
			let ( key, property ) = spec.canonical( &config.name )
				.map_err(| source | raise( ContextError::InvalidSlot {
					name: config.name.clone(),
					role: Role::Output,
					position: position + 1,
					source,
				}))?;
			output_order.push(( key.clone(), property.clone() ));
			output_map.entry( key ).or_default().insert( property, Update::Keep );
		}

		let location = match &config.location {
			Some( id ) => Some( Self::parse_location( &state_map, id )),
			None => None,
		};

		Ok( Self {
			config,
			trigger,
			inputs: input_map,
			states: state_map,
			outputs: output_map,
			output_order,
			location,
			started,
		})

	}

	fn bind_role(
		specs: &[SlotSpec],
		values: impl Iterator<Item = Value>,
		name: &str,
	) -> Result<HashMap<String, HashMap<String, Value>>, ContextError> {

		let mut namespace: HashMap<String, HashMap<String, Value>> = HashMap::new();
		for (( position, spec ), value ) in specs.iter().enumerate().zip( values ) {
			let ( key, property ) = spec.canonical( name )
				.map_err(| source | raise( ContextError::InvalidSlot {
					name: name.to_string(),
					role: spec.role(),
					position: position + 1,
					source,
				}))?;
			namespace.entry( key ).or_default().insert( property, value );
		}
		Ok( namespace )
	}

	/// Extracts path, query map and fragment from the location slot's state
	/// entries. Missing or non-string properties fall back to empty.
	fn parse_location(
		states: &HashMap<String, HashMap<String, Value>>,
		id: &str,
	) -> Location {

		let text = | property: &str | states.get( id )
			.and_then(| properties | properties.get( property ))
			.and_then( Value::as_str )
			.unwrap_or( "" )
			.to_string();

		let mut query = Map::new();
		let search = text( "search" );
		for ( key, value ) in form_urlencoded::parse( search.trim_start_matches( '?' ).as_bytes() ) {
			let value = Value::String( value.into_owned() );
			match query.entry( key.into_owned() ) {
				Entry::Vacant( slot ) => { slot.insert( value ); },
				Entry::Occupied( mut slot ) => match slot.get_mut() {
					Value::Array( values ) => values.push( value ),
					scalar => {
						let first = scalar.take();
						*scalar = Value::Array( vec![ first, value ]);
					},
				},
			}
		}

		Location {
			path: text( "pathname" ),
			query,
			hash: text( "hash" ).trim_start_matches( '#' ).to_string(),
		}
	}

	/// The decoded identifier of the slot that triggered this invocation, or
	/// `None` when the framework invoked without any real change.
	#[inline] pub fn triggered_id( &self ) -> Option<TriggerId> { self.trigger.id() }

	/// The property name that triggered this invocation.
	#[inline] pub fn triggered_prop( &self ) -> Option<&str> { self.trigger.prop() }

	/// The parsed navigation location, when one is configured.
	#[inline] pub fn location( &self ) -> Option<&Location> { self.location.as_ref() }

	/// Wall-clock time since this context was built. Used for log lines only.
	#[inline] pub fn elapsed( &self ) -> Duration { self.started.elapsed() }

	/// The diagnostic name this context logs under.
	#[inline] pub fn name( &self ) -> &str { &self.config.name }

	/// Reads an input or state value, resolving the property automatically.
	///
	/// Returns `Ok( None )` when the slot is absent; absence is always
	/// tolerated. Normalization itself is not: a malformed or ambiguous
	/// reference is an error the caller must fix by naming the property,
	/// see [`get_prop`]( Self::get_prop ).
	///
	/// # Errors
	/// Any [`SlotError`] from normalizing `slot` against inputs and states.
	pub fn get( &self, slot: impl Into<SlotRef> ) -> Result<Option<&Value>, SlotError> {
		self.lookup( &slot.into(), None )
	}

	/// Reads an input or state value under an explicit property.
	///
	/// # Errors
	/// Any [`SlotError`] from normalizing `slot`.
	pub fn get_prop(
		&self,
		slot: impl Into<SlotRef>,
		property: &str,
	) -> Result<Option<&Value>, SlotError> {
		self.lookup( &slot.into(), Some( property ))
	}

	/// Subscript-style lookup: tolerant of everything.
	///
	/// `None` means the slot is genuinely absent (or the reference did not
	/// normalize, which is logged); `Some( Value::Null )` is a present null
	/// value. The two are never conflated.
	pub fn value( &self, slot: impl Into<SlotRef> ) -> Option<&Value> {
		self.lookup( &slot.into(), None ).ok().flatten()
	}

	fn lookup(
		&self,
		slot: &SlotRef,
		property: Option<&str>,
	) -> Result<Option<&Value>, SlotError> {
		let resolved = slot.resolve(
			property,
			&[ &self.inputs, &self.states ],
			&self.config.name,
		);
		let ( key, property ) = match resolved {
			Ok( pair ) => pair,
			// Absence is tolerated; only malformed or ambiguous references
			// are the caller's problem.
			Err( SlotError::UnknownKey { .. } ) => return Ok( None ),
			Err( error ) => return Err( error ),
		};
		Ok( [ &self.inputs, &self.states ].into_iter()
			.find_map(| namespace | namespace.get( &key )?.get( &property )))
	}

	/// Writes an output slot, resolving the property automatically.
	///
	/// Unlike reads, writes are strict: an unresolvable key or property is an
	/// error, never a silent no-op.
	///
	/// # Errors
	/// - Any [`SlotError`] from normalizing `slot` against outputs.
	/// - [`ContextError::UnknownOutput`] if the resolved pair is not a
	///   declared output.
	pub fn set(
		&mut self,
		slot: impl Into<SlotRef>,
		value: impl Into<Value>,
	) -> Result<(), ContextError> {
		self.write( &slot.into(), None, Update::Value( value.into() ))
	}

	/// Writes an output slot under an explicit property.
	///
	/// # Errors
	/// As [`set`]( Self::set ).
	pub fn set_prop(
		&mut self,
		slot: impl Into<SlotRef>,
		property: &str,
		value: impl Into<Value>,
	) -> Result<(), ContextError> {
		self.write( &slot.into(), Some( property ), Update::Value( value.into() ))
	}

	fn write(
		&mut self,
		slot: &SlotRef,
		property: Option<&str>,
		value: Update,
	) -> Result<(), ContextError> {

		let ( key, property ) = slot.resolve( property, &[ &self.outputs ], &self.config.name )?;
		let target = self.outputs.get_mut( &key )
			.and_then(| properties | properties.get_mut( &property ));
		match target {
			Some( slot ) => { *slot = value ; Ok(()) },
			None => Err( raise( ContextError::UnknownOutput {
				name: self.config.name.clone(),
				key,
				property,
			})),
		}
	}

	/// Applies [`set`]( Self::set ) once per entry.
	///
	/// # Errors
	/// As [`set`]( Self::set ); entries before the failing one stay written.
	pub fn set_dict<S: Into<SlotRef>>(
		&mut self,
		entries: impl IntoIterator<Item = ( S, Value )>,
	) -> Result<(), ContextError> {
		entries.into_iter()
			.try_for_each(|( slot, value )| self.set( slot, value ))
	}

	/// Assigns all declared outputs positionally, in declaration order.
	///
	/// # Errors
	/// [`ContextError::OutputArity`] if `values` does not have exactly one
	/// value per declared output. The output namespace is left untouched on
	/// failure.
	pub fn set_list( &mut self, values: Vec<Value> ) -> Result<(), ContextError> {

		if values.len() != self.output_order.len() {
			return Err( raise( ContextError::OutputArity {
				name: self.config.name.clone(),
				expected: self.output_order.len(),
				received: values.len(),
			}));
		}

		for (( key, property ), value ) in self.output_order.clone().into_iter().zip( values ) {
			let target = self.outputs.get_mut( &key )
				.and_then(| properties | properties.get_mut( &property ));
			match target {
				Some( slot ) => *slot = Update::Value( value ),
				None => return Err( raise( ContextError::MissingOutput {
					name: self.config.name.clone(),
					key,
					property,
				})),
			}
		}
		Ok(())
	}

	/// Marshals the output namespace into the framework's positional layout.
	///
	/// A single declared output is unwrapped to the bare value; several are
	/// returned as a sequence in declaration order. Slots never written stay
	/// [`Update::Keep`].
	///
	/// # Errors
	/// [`ContextError::MissingOutput`] if an ordered entry is absent from the
	/// output namespace - an internal consistency failure.
	pub fn output( &self ) -> Result<Response, ContextError> {

		let mut values = Vec::with_capacity( self.output_order.len() );
		for ( key, property ) in &self.output_order {
			let value = self.outputs.get( key )
				.and_then(| properties | properties.get( property ))
				.ok_or_else(|| raise( ContextError::MissingOutput {
					name: self.config.name.clone(),
					key: key.clone(),
					property: property.clone(),
				}))?;
			values.push( value.clone() );
		}

		Ok( match <[Update; 1]>::try_from( values ) {
			Ok([ single ]) => Response::Single( single ),
			Err( values ) => Response::Many( values ),
		})
	}

}

impl std::fmt::Display for BindingContext {

	/// Human-readable dump of the trigger, the location (if configured) and
	/// all three namespaces. Unwritten outputs render as `<keep>`.
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {

		let show = | id: Option<TriggerId> | id.map_or( "<none>".to_string(), | id | id.to_string() );
		writeln!(
			f,
			"[{}] Callback Info: trigger component='{}' prop='{}'",
			self.config.name,
			show( self.triggered_id() ),
			self.triggered_prop().unwrap_or( "<none>" ),
		)?;
		if let Some( defined_at ) = self.config.defined_at {
			writeln!( f, "Registered at {}", defined_at )?;
		}

		if let Some( location ) = &self.location {
			writeln!(
				f,
				"Location path='{}' query={} hash='{}'",
				location.path,
				Value::Object( location.query.clone() ),
				location.hash,
			)?;
		}

		writeln!( f, "Inputs({})", self.inputs.len() )?;
		for ( key, properties ) in &self.inputs {
			writeln!( f, "    {}: {:?}", key, properties )?;
		}
		writeln!( f, "States({})", self.states.len() )?;
		for ( key, properties ) in &self.states {
			writeln!( f, "    {}: {:?}", key, properties )?;
		}
		writeln!( f, "Outputs({})", self.outputs.len() )?;
		for ( key, properties ) in &self.outputs {
			let rendered = properties.iter()
				.map(|( property, value )| format!( "{}: {}", property, value ))
				.collect::<Vec<_>>()
				.join( ", " );
			writeln!( f, "    {}: {{ {} }}", key, rendered )?;
		}

		Ok(())
	}

}
