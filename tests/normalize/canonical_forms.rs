use serde_json::json ;
use slot_link::{ normalize, SlotSpec };

#[test]
fn text_with_separator_splits() {
	let pair = normalize( "btn1:n_clicks", None, "test" ).expect( "Failed to normalize" );
	assert_eq!( pair, ( "btn1".to_string(), "n_clicks".to_string() ));
}

#[test]
fn explicit_property_overrides_derived() {
	let pair = normalize( "btn1:n_clicks", Some( "disabled" ), "test" ).expect( "Failed to normalize" );
	assert_eq!( pair, ( "btn1".to_string(), "disabled".to_string() ));
}

#[test]
fn declared_spec_carries_both_parts() {
	let spec = SlotSpec::input( "btn1", "n_clicks" );
	let pair = normalize( spec, None, "test" ).expect( "Failed to normalize" );
	assert_eq!( pair, ( "btn1".to_string(), "n_clicks".to_string() ));
}

#[test]
fn pattern_discriminator_becomes_key() {
	let map = json!({ "type": "row", "index": 3 })
		.as_object().expect( "Fixture is an object" ).clone();
	let pair = normalize( map, Some( "value" ), "test" ).expect( "Failed to normalize" );
	assert_eq!( pair, ( "row".to_string(), "value".to_string() ));
}

#[test]
fn normalizing_a_canonical_pair_is_idempotent() {

	let ( key, property ) = normalize( "btn1:n_clicks", None, "test" ).expect( "Failed to normalize" );
	let again = normalize( key.as_str(), Some( &property ), "test" ).expect( "Failed to normalize" );
	assert_eq!( again, ( key, property ));

	let first = normalize( "output1:children", None, "test" ).expect( "Failed to normalize" );
	let second = normalize( "output1:children", None, "test" ).expect( "Failed to normalize" );
	assert_eq!( first, second );

}
