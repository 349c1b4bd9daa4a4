/// Compares the JSON form of a serializable value against a JSON literal,
/// ignoring formatting and key order.
#[macro_export]
macro_rules! assert_json_eq {
    ($value:expr, $json_string:expr$(,)?) => {
        match (&$value, &$json_string) {
            (value, json_string) => {
                let json_left = serde_json::to_value(value)
                    .unwrap_or_else(|e|
                        panic!("failed to serialize \"{:?}\": {e}", value)
                    );
                let json_right: serde_json::Value = serde_json
                    ::from_str(AsRef::<str>::as_ref(json_string))
                    .unwrap_or_else(|e|
                        panic!("failed to parse \"{:?}\": {e}", json_string)
                    );
                if json_left != json_right {
                    panic!(
                        r#"assertion `left == right` failed
       left: {:?}
  json_left: {}
 json_right: {}"#,
                        value,
                        json_left,
                        json_right,
                    )
                }
            }
        }
    };
}

/// Parses raw document bytes the way the document store writes them.
pub fn parse_document(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|e|
            panic!(
                "document is not valid json ({e}): {}",
                String::from_utf8_lossy(bytes),
            )
        )
}
