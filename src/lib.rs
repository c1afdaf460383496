//! A callback argument-binding layer for reactive UI frameworks.
//!
//! Reactive frameworks deliver callback arguments as a flat, positionally
//! ordered value list and expect outputs back in the same positional style.
//! `slot_link` sits between that convention and your business logic: it
//! rebuilds a named view of which input/state slot holds which value, lets
//! logic read and write slots by name, and marshals the written outputs back
//! into the framework's declaration order.
//!
//! # Core Concepts
//!
//! - [`SlotSpec`]: A declared slot descriptor - identifier, property and
//! 	namespace role ([`Role::Input`], [`Role::State`] or [`Role::Output`]).
//! 	Declared once per callback at registration time, immutable afterwards.
//!
//! - [`SlotRef`]: Any accepted shape for naming a slot at a call site - a
//! 	declared spec, a pattern map keyed by its `"type"` discriminator,
//! 	`"id:prop"` text or a bare `"id"`. All shapes normalize to one
//! 	canonical `( key, property )` pair; no call site branches on shape.
//!
//! - [`Component`] / [`discover`]: The declared UI tree and its one-time
//! 	walk into an identifier → kind map, used for registration-time
//! 	validation and diagnostics.
//!
//! - [`Registration`]: A registered callback site. [`register`] validates
//! 	the declared slots against the discovered topology (and auto-wires a
//! 	location component's `pathname`/`search`/`hash` states); the host
//! 	event loop then drives [`Registration::invoke`] once per event.
//!
//! - [`BindingContext`]: The per-invocation named view handed to business
//! 	logic as its sole argument. Built fresh for every invocation, owned by
//! 	it, discarded afterwards.
//!
//! - [`Update`] / [`Response`]: Output slots start as [`Update::Keep`], the
//! 	framework's "leave as-is" sentinel, distinct from an absent slot and
//! 	from an explicit null. A failed or no-change invocation returns
//! 	[`Response::KeepAll`]; otherwise a single declared output is unwrapped
//! 	([`Response::Single`]) and several return in declaration order
//! 	([`Response::Many`]).
//!
//! Business logic never sees the framework: it receives a
//! `&mut BindingContext`, returns a [`LogicValue`] (nothing, one value, or
//! one value per output) or an error, and the invocation wrapper does the
//! rest. Errors inside an invocation are logged and swallowed into
//! [`Response::KeepAll`] - a single failing callback must never crash the
//! event loop.
//!
//! # Re-exports
//!
//! `slot_link` re-exports [`NEVec`] and [`nev`] from `nonempty-collections`;
//! a registration takes its outputs as a `NEVec` since a callback without
//! outputs is meaningless to the framework.
//!
//! # Example
//!
//! ```
//! use serde_json::{ json, Value };
//! use slot_link::{
//! 	register, Component, LogicValue, Options, Response, SlotSpec,
//! 	Trigger, Update, nev,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // The UI layer declares a component tree. Only identified nodes matter
//! // to validation; the rest are structural.
//! let tree = Component::new( "Div" ).children([
//! 	Component::with_id( "Button", "btn1" ),
//! 	Component::with_id( "Div", "output1" ),
//! ]);
//!
//! // Register the callback site once: one output, one input, no states.
//! let registration = register(
//! 	nev![ SlotSpec::output( "output1", "children" )],
//! 	[ SlotSpec::input( "btn1", "n_clicks" )],
//! 	Vec::new(),
//! 	&tree,
//! 	Options::named( "btn1_demo" ),
//! )?;
//!
//! // On every event the host hands over the flat positional argument list
//! // and the framework's trigger record.
//! let trigger = Trigger::new([ "btn1.n_clicks" ]);
//! let response = registration.invoke( vec![ json!( 3 )], &trigger, | ctx | {
//! 	let clicks = ctx.get( "btn1" )?.cloned().unwrap_or( Value::Null );
//! 	ctx.set( "output1", json!( format!( "Clicked {} times", clicks )))?;
//! 	Ok( LogicValue::Unchanged )
//! });
//!
//! // One declared output, so the response unwraps to the bare value.
//! assert_eq!( response, Response::Single( Update::Value( json!( "Clicked 3 times" ))));
//! # Ok(())
//! # }
//! ```

mod slot ;
mod update ;
mod trigger ;
mod topology ;
mod context ;
mod registration ;

#[doc( no_inline )]
pub use nonempty_collections::{ NEVec, nev };

pub use slot::{ normalize, Role, SlotError, SlotId, SlotRef, SlotSpec };
pub use update::{ LogicValue, Response, Update };
pub use trigger::{ Trigger, TriggerId };
pub use topology::{ discover, Component, TopologyError, LOCATION_KIND };
pub use context::{ BindingContext, ContextConfig, ContextError, Location };
pub use registration::{ register, Options, Registration, RegistrationError };
