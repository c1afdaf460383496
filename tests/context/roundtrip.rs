use serde_json::json ;
use slot_link::{ BindingContext, ContextConfig, Response, Trigger, Update };

use crate::fixtures ;

#[test]
fn declared_slots_read_back_supplied_values() {

	let context = BindingContext::new(
		&fixtures::click_inputs(),
		&fixtures::session_states(),
		&fixtures::div_outputs(),
		vec![ json!( 3 ), json!( 7 ), json!({ "user": "ana" })],
		Trigger::new([ "btn1.n_clicks" ]),
		ContextConfig::named( "roundtrip" ),
	).expect( "Failed to build context" );

	assert_eq!( context.get( "btn1" ).expect( "Failed to resolve" ), Some( &json!( 3 )));
	assert_eq!( context.get( "btn2" ).expect( "Failed to resolve" ), Some( &json!( 7 )));
	assert_eq!(
		context.get_prop( "session", "data" ).expect( "Failed to resolve" ),
		Some( &json!({ "user": "ana" })),
	);

	// Untouched outputs marshal as Keep, in declaration order.
	match context.output() {
		Ok( Response::Many( values )) => assert_eq!( values, vec![ Update::Keep, Update::Keep ]),
		value => panic!( "Expected Many([ Keep, Keep ]), found: {:#?}", value ),
	}

}

#[test]
fn colon_text_and_spec_references_are_interchangeable() {

	let inputs = fixtures::click_inputs();
	let context = BindingContext::new(
		&inputs,
		&[],
		&fixtures::div_outputs(),
		vec![ json!( 1 ), json!( 2 )],
		Trigger::new([ "btn2.n_clicks" ]),
		ContextConfig::named( "roundtrip" ),
	).expect( "Failed to build context" );

	assert_eq!( context.get( "btn2:n_clicks" ).expect( "Failed to resolve" ), Some( &json!( 2 )));
	assert_eq!( context.get( &inputs[ 1 ]).expect( "Failed to resolve" ), Some( &json!( 2 )));

}

#[test]
fn pattern_slots_bind_by_discriminator() {

	let row = json!({ "type": "row", "index": 3 })
		.as_object().expect( "Fixture is an object" ).clone();
	let inputs = vec![ slot_link::SlotSpec::input( row.clone(), "value" )];

	let context = BindingContext::new(
		&inputs,
		&[],
		&fixtures::div_outputs(),
		vec![ json!( "cell" )],
		Trigger::new([ r#"{"index":3,"type":"row"}.value"# ]),
		ContextConfig::named( "roundtrip" ),
	).expect( "Failed to build context" );

	assert_eq!( context.get( "row" ).expect( "Failed to resolve" ), Some( &json!( "cell" )));
	assert_eq!( context.get( row ).expect( "Failed to resolve" ), Some( &json!( "cell" )));

}
