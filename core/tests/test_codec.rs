// Codec backends: bincode, JSON, function pairs.

mod common;

#[cfg(test)]
mod tests {
    use onwire_core::codec::{BincodeCodec, Codec, CodecError, CodecKind, FnCodec, JsonCodec};

    use super::common::{sample_struct, TestStruct};

    #[test]
    fn bincode_roundtrip_struct() {
        let v = sample_struct();
        let bytes = Codec::<TestStruct>::encode(&BincodeCodec, &v).unwrap();
        let back: TestStruct = BincodeCodec.decode(&bytes).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn json_is_readable_text() {
        let bytes = JsonCodec.encode(&vec![1u32, 2, 3]).unwrap();
        assert_eq!(bytes, b"[1,2,3]");
        let back: Vec<u32> = JsonCodec.decode(&bytes).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn bincode_rejects_trailing_bytes() {
        let mut bytes = Codec::<u32>::encode(&BincodeCodec, &7).unwrap();
        bytes.push(0);
        let err = Codec::<u32>::decode(&BincodeCodec, &bytes).unwrap_err();
        assert!(matches!(err, CodecError::Decode { .. }));
    }

    #[test]
    fn structural_mismatch_is_decode_error() {
        let bytes = JsonCodec.encode(&"a string".to_string()).unwrap();
        let err = Codec::<TestStruct>::decode(&JsonCodec, &bytes).unwrap_err();
        match err {
            CodecError::Decode { codec, .. } => assert_eq!(codec, "json"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn fn_codec_uses_caller_functions() {
        let codec = FnCodec::new(
            |s: &String| Ok(s.to_uppercase().into_bytes()),
            |b: &[u8]| String::from_utf8(b.to_vec()).map_err(|e| CodecError::decode("utf8", e)),
        );

        let bytes = codec.encode(&"shout".to_string()).unwrap();
        assert_eq!(bytes, b"SHOUT");
        assert_eq!(codec.decode(&bytes).unwrap(), "SHOUT");
        assert!(codec.decode(&[0xFF]).is_err());
        assert_eq!(codec.name(), "custom");
    }

    #[test]
    fn codec_kind_parses_lowercase() {
        let k: CodecKind = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(k, CodecKind::Json);
        assert_eq!(CodecKind::default(), CodecKind::Bincode);
        assert_eq!(CodecKind::Bincode.to_string(), "bincode");
    }
}
