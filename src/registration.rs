//! Two-phase registration and the invocation wrapper.
//!
//! [`register`] runs once per callback at setup time: it discovers (or is
//! handed) the component topology, cross-validates the declared slots
//! against it, and wires up the location states. The returned
//! [`Registration`] is then driven by the host event loop through
//! [`Registration::invoke`], which owns the per-call lifecycle: build a
//! [`BindingContext`], detect no-change invocations, run business logic,
//! harvest its result and marshal the positional response. Failures inside
//! an invocation are logged and become [`Response::KeepAll`]; they never
//! reach the event loop.

use std::collections::HashMap ;

use itertools::Itertools ;
use nonempty_collections::NEVec ;
use serde_json::Value ;
use thiserror::Error ;

use crate::context::{ BindingContext, ContextConfig };
use crate::slot::{ raise, Role, SlotSpec };
use crate::topology::{ discover, Component, LOCATION_KIND, TopologyError };
use crate::trigger::Trigger ;
use crate::update::{ LogicValue, Response };



/// Errors that can occur while registering a callback.
///
/// Registration errors are programming errors in the declaration, not
/// runtime conditions: they are raised to the caller and the callback is
/// not registered.
#[derive( Error, Debug )]
pub enum RegistrationError {
	/// The component tree walk failed.
	#[error( transparent )]
	Topology( #[from] TopologyError ),
	/// Declared identifiers are absent from the discovered topology and
	/// structural errors are not suppressed.
	#[error( "[{name}] Declared ids absent from topology: {ids}" )]
	UnknownIds { name: String, ids: String },
	/// A declared slot identifier failed to normalize.
	#[error( transparent )]
	Slot( #[from] crate::SlotError ),
}

/// Registration-time configuration.
#[derive( Clone, PartialEq, Debug )]
pub struct Options {
	/// Diagnostic label used in every log line and error message.
	pub name: String,
	/// Enables verbose per-invocation logging and the registration-time
	/// slot table dump.
	pub debug: bool,
	/// Tolerates declared identifiers absent from the topology instead of
	/// raising. Needed when identifiers are dynamic or pattern-based and
	/// cannot appear in a static tree walk.
	pub suppress_structural_errors: bool,
	/// Forces the debug rendering into completion log lines even for
	/// invocations that changed nothing.
	pub log_on_exit: bool,
	/// Overrides automatic topology discovery with a caller-supplied tree.
	/// Useful when the live tree is generated dynamically.
	pub topology: Option<Component>,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			name: "default".to_string(),
			debug: false,
			suppress_structural_errors: false,
			log_on_exit: false,
			topology: None,
		}
	}
}

impl Options {

	/// Options with the given diagnostic name and everything else default.
	#[inline]
	pub fn named( name: impl Into<String> ) -> Self {
		Self { name: name.into(), ..Self::default() }
	}

}

/// A registered callback site, ready to be driven by the host event loop.
///
/// Holds the immutable declared descriptor lists and the read-only topology
/// map. Every call to [`invoke`]( Self::invoke ) builds a fresh
/// [`BindingContext`]; nothing is shared between invocations.
#[derive( Debug )]
pub struct Registration {
	inputs: Vec<SlotSpec>,
	states: Vec<SlotSpec>,
	outputs: Vec<SlotSpec>,
	config: ContextConfig,
	topology: HashMap<String, String>,
}

/// Registers a callback site against a declared component tree.
///
/// A callback declares one or more outputs (enforced by [`NEVec`]), and zero
/// or more inputs and states. The tree is walked once into an identifier →
/// kind map (unless `options.topology` supplies one to walk instead), every
/// declared identifier is checked against it, and if the topology contains
/// exactly one location-kind component that is not already wired, three
/// state descriptors for its `pathname`/`search`/`hash` properties are
/// appended so the context exposes a parsed
/// [`Location`]( crate::Location ) without explicit wiring.
///
/// With `options.debug` set, a table of every discovered slot and the roles
/// it plays here is logged, with declared identifiers missing from the
/// topology flagged `(unknown)`.
///
/// The call site of `register` is captured and carried into the context's
/// debug rendering, so a log dump names where the failing callback was
/// registered.
///
/// # Errors
/// - [`RegistrationError::Topology`] if the tree walk finds a duplicate
///   identifier or no identifiers at all.
/// - [`RegistrationError::UnknownIds`] in strict mode (the default) when
///   declared identifiers are absent from the topology.
/// - [`RegistrationError::Slot`] if a declared identifier cannot be
///   normalized.
#[track_caller]
pub fn register(
	outputs: NEVec<SlotSpec>,
	inputs: impl IntoIterator<Item = SlotSpec>,
	states: impl IntoIterator<Item = SlotSpec>,
	tree: &Component,
	options: Options,
) -> Result<Registration, RegistrationError> {

	let outputs = outputs.into_iter().collect::<Vec<_>>();
	let inputs = inputs.into_iter().collect::<Vec<_>>();
	let mut states = states.into_iter().collect::<Vec<_>>();

	debug_assert!( outputs.iter().all(| s | s.role() == Role::Output ), "output list holds a non-output spec" );
	debug_assert!( inputs.iter().all(| s | s.role() == Role::Input ), "input list holds a non-input spec" );
	debug_assert!( states.iter().all(| s | s.role() == Role::State ), "state list holds a non-state spec" );

	let topology = discover( options.topology.as_ref().unwrap_or( tree ))?;

	let declared = | specs: &[SlotSpec] | specs.iter()
		.map(| spec | spec.canonical( &options.name ).map(|( key, _ )| ( key, spec.role() )))
		.collect::<Result<Vec<_>, _>>();
	let declared_keys = [ &inputs, &states, &outputs ].into_iter()
		.map(| specs | declared( specs ))
		.flatten_ok()
		.collect::<Result<Vec<_>, _>>()?;

	let unknown = declared_keys.iter()
		.map(|( key, _ )| key )
		.filter(| key | !topology.contains_key( *key ))
		.unique()
		.collect::<Vec<_>>();
	if !unknown.is_empty() && !options.suppress_structural_errors {
		return Err( raise( RegistrationError::UnknownIds {
			name: options.name.clone(),
			ids: unknown.iter().join( ", " ),
		}));
	}

	// Wire up the location component when the topology has exactly one and
	// the caller didn't.
	let mut location = None ;
	let location_ids = topology.iter()
		.filter(|( _, kind )| kind.as_str() == LOCATION_KIND )
		.map(|( id, _ )| id )
		.collect::<Vec<_>>();
	if let [ id ] = location_ids.as_slice() {
		let wired = declared_keys.iter()
			.any(|( key, role )| key == *id && matches!( role, Role::Input | Role::State ));
		if !wired {
			for property in [ "pathname", "search", "hash" ] {
				states.push( SlotSpec::state( id.as_str(), property ));
			}
		}
		location = Some(( *id ).clone() );
	}

	if options.debug {
		log_slot_table( &options.name, &topology, &declared_keys );
	}

	let config = ContextConfig {
		name: options.name,
		debug: options.debug,
		log_on_exit: options.log_on_exit,
		location,
		defined_at: Some( std::panic::Location::caller() ),
	};

	Ok( Registration { inputs, states, outputs, config, topology })

}

/// Logs the registration-time slot table: every discovered identifier, its
/// kind, and the roles it plays for this callback. Declared identifiers not
/// found in the topology are listed with an `(unknown)` kind marker.
/// Diagnostic only.
fn log_slot_table(
	name: &str,
	topology: &HashMap<String, String>,
	declared: &[( String, Role )],
) {

	let roles_of = | id: &str | declared.iter()
		.filter(|( key, _ )| key.as_str() == id )
		.map(|( _, role )| role.to_string() )
		.unique()
		.join( ", " );

	let mut table = format!( "[{}] Registered slots:", name );
	for ( id, kind ) in topology.iter().sorted() {
		let roles = roles_of( id );
		let roles = match roles.is_empty() {
			true => "-".to_string(),
			false => roles,
		};
		table.push_str( &format!( "\n    {} ({}): {}", id, kind, roles ));
	}
	for id in declared.iter().map(|( key, _ )| key ).unique() {
		if !topology.contains_key( id ) {
			table.push_str( &format!( "\n    {} (unknown): {}", id, roles_of( id )));
		}
	}
	log::debug!( "{}", table );

}

impl Registration {

	/// The declared input descriptors, in positional order.
	#[inline] pub fn inputs( &self ) -> &[SlotSpec] { &self.inputs }

	/// The declared state descriptors, in positional order (including any
	/// auto-injected location states).
	#[inline] pub fn states( &self ) -> &[SlotSpec] { &self.states }

	/// The declared output descriptors, in declaration order.
	#[inline] pub fn outputs( &self ) -> &[SlotSpec] { &self.outputs }

	/// The discovered identifier → kind topology map.
	#[inline] pub fn topology( &self ) -> &HashMap<String, String> { &self.topology }

	/// The diagnostic name this registration logs under.
	#[inline] pub fn name( &self ) -> &str { &self.config.name }

	/// Runs one invocation: the host event loop calls this with the flat
	/// positional argument list and the framework's trigger record.
	///
	/// Lifecycle:
	/// - Context construction failure: logged, returns
	///   [`Response::KeepAll`].
	/// - Empty trigger (no actual change, e.g. startup gating): logged at
	///   debug severity, returns [`Response::KeepAll`].
	/// - Otherwise `logic` runs with the context as sole argument. A
	///   returned [`LogicValue::Group`] is applied as a positional bulk
	///   assignment, a [`LogicValue::One`] as a single-output assignment,
	///   and [`LogicValue::Unchanged`] assumes the function wrote outputs
	///   through [`BindingContext::set`] directly.
	/// - Success: logged at info severity with the elapsed wall-clock
	///   duration, returns the context's positional output.
	/// - Any error from `logic` or from marshaling: logged with the full
	///   debug rendering, returns [`Response::KeepAll`]. Nothing propagates
	///   to the event loop.
	pub fn invoke<F>( &self, args: Vec<Value>, trigger: &Trigger, logic: F ) -> Response
	where
		F: FnOnce( &mut BindingContext ) -> Result<LogicValue, Box<dyn std::error::Error>>,
	{

		let context = BindingContext::new(
			&self.inputs,
			&self.states,
			&self.outputs,
			args,
			trigger.clone(),
			self.config.clone(),
		);
		let mut context = match context {
			Ok( context ) => context,
			// Already logged at the failure site; the framework just sees
			// an unchanged response.
			Err( _ ) => return Response::KeepAll,
		};

		if context.triggered_id().is_none() {
			log::debug!( "[{}] Callback Result: No change", self.config.name );
			if self.config.log_on_exit {
				log::debug!( "{}", context );
			}
			return Response::KeepAll ;
		}

		let returned = logic( &mut context );
		let outcome = returned.and_then(| value | {
			match value {
				LogicValue::Unchanged => {},
				LogicValue::One( value ) => context.set_list( vec![ value ])?,
				LogicValue::Group( values ) => context.set_list( values )?,
			}
			Ok( context.output()? )
		});

		match outcome {
			Ok( response ) => {
				log::info!(
					"[{}] Callback Result: Completed (time={:.3}s)",
					self.config.name,
					context.elapsed().as_secs_f64(),
				);
				if self.config.debug || self.config.log_on_exit {
					log::debug!( "{}", context );
				}
				response
			},
			Err( error ) => {
				log::error!(
					"[{}] Callback Result: Failed: {} (time={:.3}s)\n{}",
					self.config.name,
					error,
					context.elapsed().as_secs_f64(),
					context,
				);
				Response::KeepAll
			},
		}

	}

}
