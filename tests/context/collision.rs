use serde_json::json ;
use slot_link::{ BindingContext, ContextConfig, ContextError, SlotSpec, Trigger };

use crate::fixtures ;

#[test]
fn same_key_and_property_in_both_namespaces_fails() {

	let result = BindingContext::new(
		&[ SlotSpec::input( "session", "data" )],
		&[ SlotSpec::state( "session", "data" )],
		&fixtures::div_outputs(),
		vec![ json!( 1 ), json!( 2 )],
		Trigger::none(),
		ContextConfig::named( "collision" ),
	);

	match result {
		Err( ContextError::Collision { key, property, .. } ) => {
			assert_eq!( key, "session" );
			assert_eq!( property, "data" );
		},
		value => panic!( "Expected Collision error, found: {:#?}", value.map(| _ | () )),
	}

}

#[test]
fn same_key_with_different_properties_succeeds() {

	let context = BindingContext::new(
		&[ SlotSpec::input( "session", "modified_timestamp" )],
		&[ SlotSpec::state( "session", "data" )],
		&fixtures::div_outputs(),
		vec![ json!( 1700000000 ), json!({ "user": "ana" })],
		Trigger::new([ "session.modified_timestamp" ]),
		ContextConfig::named( "collision" ),
	).expect( "Failed to build context" );

	assert_eq!(
		context.get_prop( "session", "modified_timestamp" ).expect( "Failed to resolve" ),
		Some( &json!( 1700000000 )),
	);
	assert_eq!(
		context.get_prop( "session", "data" ).expect( "Failed to resolve" ),
		Some( &json!({ "user": "ana" })),
	);

}

#[test]
fn argument_count_must_match_declarations() {

	let result = BindingContext::new(
		&fixtures::click_inputs(),
		&[],
		&fixtures::div_outputs(),
		vec![ json!( 1 )],
		Trigger::none(),
		ContextConfig::named( "collision" ),
	);

	match result {
		Err( ContextError::ArgumentCount { expected, received, .. } ) => {
			assert_eq!(( expected, received ), ( 2, 1 ));
		},
		value => panic!( "Expected ArgumentCount error, found: {:#?}", value.map(| _ | () )),
	}

}
