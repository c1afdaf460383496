use serde_json::{ json, Value };
use slot_link::{ normalize, SlotError, SlotRef };

#[test]
fn too_many_separator_tokens() {
	match normalize( "a:b:c", None, "test" ) {
		Err( SlotError::MalformedText { key, .. } ) => assert_eq!( key, "a:b:c" ),
		value => panic!( "Expected MalformedText error, found: {:#?}", value ),
	}
}

#[test]
fn pattern_without_discriminator() {
	let map = json!({ "index": 3 }).as_object().expect( "Fixture is an object" ).clone();
	match normalize( map, Some( "value" ), "test" ) {
		Err( SlotError::MissingDiscriminator { .. } ) => {}
		value => panic!( "Expected MissingDiscriminator error, found: {:#?}", value ),
	}
}

#[test]
fn bare_text_without_property_or_namespaces() {
	match normalize( "btn1", None, "test" ) {
		Err( SlotError::MissingProperty { key, .. } ) => assert_eq!( key, "btn1" ),
		value => panic!( "Expected MissingProperty error, found: {:#?}", value ),
	}
}

#[test]
fn unsupported_value_kind_is_rejected() {
	match SlotRef::try_from( &json!( 42 )) {
		Err( SlotError::UnsupportedKind { key } ) => assert_eq!( key, "42" ),
		value => panic!( "Expected UnsupportedKind error, found: {:#?}", value ),
	}
}

#[test]
fn json_string_and_object_convert() {
	assert!( SlotRef::try_from( &Value::String( "btn1".to_string() )).is_ok() );
	assert!( SlotRef::try_from( &json!({ "type": "row" })).is_ok() );
}
