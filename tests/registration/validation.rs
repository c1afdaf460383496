use slot_link::{
	discover, nev, register, Component, Options, RegistrationError, SlotSpec,
	TopologyError,
};

use crate::fixtures ;

#[test]
fn duplicate_tree_ids_fail_discovery() {

	let tree = Component::new( "Div" ).children([
		Component::with_id( "Button", "btn1" ),
		Component::with_id( "Div", "btn1" ),
	]);

	match discover( &tree ) {
		Err( TopologyError::DuplicateId { id, first, second } ) => {
			assert_eq!( id, "btn1" );
			assert_eq!(( first.as_str(), second.as_str() ), ( "Button", "Div" ));
		},
		value => panic!( "Expected DuplicateId error, found: {:#?}", value ),
	}

}

#[test]
fn duplicate_tree_ids_fail_registration_before_any_invocation() {

	let tree = Component::new( "Div" ).children([
		Component::with_id( "Button", "btn1" ),
		Component::with_id( "Div", "btn1" ),
	]);

	let result = register(
		nev![ SlotSpec::output( "output1", "children" )],
		vec![ SlotSpec::input( "btn1", "n_clicks" )],
		Vec::new(),
		&tree,
		Options::named( "validation" ),
	);

	match result {
		Err( RegistrationError::Topology( TopologyError::DuplicateId { .. })) => {}
		value => panic!( "Expected Topology error, found: {:#?}", value.map(| _ | () )),
	}

}

#[test]
fn empty_topology_fails_registration() {

	let tree = Component::new( "Div" ).child( Component::new( "Div" ));

	let result = register(
		nev![ SlotSpec::output( "output1", "children" )],
		Vec::new(),
		Vec::new(),
		&tree,
		Options::named( "validation" ),
	);

	match result {
		Err( RegistrationError::Topology( TopologyError::Empty )) => {}
		value => panic!( "Expected Empty topology error, found: {:#?}", value.map(| _ | () )),
	}

}

#[test]
fn unknown_declared_id_fails_in_strict_mode() {

	let result = register(
		nev![ SlotSpec::output( "output1", "children" )],
		vec![ SlotSpec::input( "btn9", "n_clicks" )],
		Vec::new(),
		&fixtures::plain_tree(),
		Options::named( "validation" ),
	);

	match result {
		Err( RegistrationError::UnknownIds { ids, .. } ) => assert_eq!( ids, "btn9" ),
		value => panic!( "Expected UnknownIds error, found: {:#?}", value.map(| _ | () )),
	}

}

#[test]
fn unknown_declared_id_tolerated_in_lenient_mode() {

	let options = Options {
		suppress_structural_errors: true,
		..Options::named( "validation" )
	};

	let result = register(
		nev![ SlotSpec::output( "output1", "children" )],
		vec![ SlotSpec::input( "btn9", "n_clicks" )],
		Vec::new(),
		&fixtures::plain_tree(),
		options,
	);
	assert!( result.is_ok() );

}

#[test]
fn explicit_topology_overrides_the_tree() {

	let live = Component::new( "Div" );
	let supplied = Component::new( "Div" ).children([
		Component::with_id( "Button", "btn1" ),
		Component::with_id( "Div", "output1" ),
	]);

	let options = Options {
		topology: Some( supplied ),
		..Options::named( "validation" )
	};

	let registration = register(
		nev![ SlotSpec::output( "output1", "children" )],
		vec![ SlotSpec::input( "btn1", "n_clicks" )],
		Vec::new(),
		&live,
		options,
	).expect( "Failed to register against the supplied topology" );

	assert_eq!( registration.topology().get( "btn1" ).map( String::as_str ), Some( "Button" ));

}
