use serde_json::json ;
use slot_link::{
	nev, register, LogicValue, Options, Response, Role, SlotSpec, Trigger, Update,
};

use crate::fixtures ;

#[test]
fn unwired_location_component_injects_three_states() {

	let registration = register(
		nev![ SlotSpec::output( "output1", "children" )],
		vec![ SlotSpec::input( "btn1", "n_clicks" )],
		Vec::new(),
		&fixtures::demo_tree(),
		Options::named( "location" ),
	).expect( "Failed to register" );

	let injected = registration.states().iter()
		.map(| spec | ( spec.role(), spec.property().to_string() ))
		.collect::<Vec<_>>();
	assert_eq!( injected, vec![
		( Role::State, "pathname".to_string() ),
		( Role::State, "search".to_string() ),
		( Role::State, "hash".to_string() ),
	]);

}

#[test]
fn invocation_exposes_parsed_location_without_wiring() {

	let registration = register(
		nev![ SlotSpec::output( "output1", "children" )],
		vec![ SlotSpec::input( "btn1", "n_clicks" )],
		Vec::new(),
		&fixtures::demo_tree(),
		Options::named( "location" ),
	).expect( "Failed to register" );

	// Positional args: declared inputs first, then the injected
	// pathname/search/hash states.
	let args = vec![
		json!( 1 ),
		json!( "/reports/42" ),
		json!( "?tag=a&tag=b&page=2" ),
		json!( "#summary" ),
	];

	let response = registration.invoke( args, &Trigger::new([ "btn1.n_clicks" ]), | ctx | {
		let location = ctx.location().expect( "Location was configured" );
		assert_eq!( location.path, "/reports/42" );
		assert_eq!( location.query.get( "tag" ), Some( &json!([ "a", "b" ])));
		assert_eq!( location.query.get( "page" ), Some( &json!( "2" )));
		assert_eq!( location.hash, "summary" );
		Ok( LogicValue::One( json!( "ok" )))
	});

	assert_eq!( response, Response::Single( Update::Value( json!( "ok" ))));

}

#[test]
fn explicitly_wired_location_is_not_injected_twice() {

	let registration = register(
		nev![ SlotSpec::output( "output1", "children" )],
		vec![ SlotSpec::input( "btn1", "n_clicks" )],
		vec![ SlotSpec::state( "url", "pathname" )],
		&fixtures::demo_tree(),
		Options::named( "location" ),
	).expect( "Failed to register" );

	assert_eq!( registration.states().len(), 1 );

}
