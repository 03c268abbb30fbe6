// zlib compressor and compression stage.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use onwire_core::compression::{
        compression_stage, CompressionError, Compressor, ZlibCompressor, DEFAULT_LEVEL_DEFLATE,
        DEFAULT_MAX_DECOMPRESSED,
    };
    use onwire_core::stage::StageKind;
    use onwire_core::types::PipelineError;

    #[test]
    fn default_level_is_six() {
        assert_eq!(ZlibCompressor::default().level(), DEFAULT_LEVEL_DEFLATE);
        assert_eq!(ZlibCompressor::new(9).unwrap().level(), 9);
    }

    #[test]
    fn level_above_nine_is_rejected() {
        assert!(matches!(
            ZlibCompressor::new(10),
            Err(CompressionError::InvalidLevel { level: 10, .. })
        ));
    }

    #[test]
    fn repetitive_input_shrinks() {
        let z = ZlibCompressor::default();
        let input = b"abcabcabc".repeat(500);
        let packed = z.compress(&input).unwrap();

        assert!(packed.len() < input.len() / 10);
        assert_eq!(z.decompress(&packed).unwrap(), input);
    }

    #[test]
    fn output_is_a_zlib_stream() {
        let packed = ZlibCompressor::default().compress(b"hello").unwrap();
        // CMF byte: deflate, 32K window
        assert_eq!(packed[0], 0x78);
    }

    #[test]
    fn garbage_fails_to_decompress() {
        let err = ZlibCompressor::default().decompress(b"not zlib at all").unwrap_err();
        assert!(matches!(err, CompressionError::CodecProcessFailed { .. }));
    }

    #[test]
    fn decompression_stops_at_output_cap() {
        let input = vec![0u8; 64 * 1024];
        let packed = ZlibCompressor::default().compress(&input).unwrap();
        assert!(packed.len() < 1024);

        let capped = ZlibCompressor::default().with_max_output(4096);
        let err = capped.decompress(&packed).unwrap_err();
        assert!(matches!(err, CompressionError::OutputTooLarge { limit: 4096, .. }));

        let exact = ZlibCompressor::default().with_max_output(input.len());
        assert_eq!(exact.decompress(&packed).unwrap(), input);
    }

    #[test]
    fn default_cap_is_documented_constant() {
        assert_eq!(ZlibCompressor::default().max_output(), DEFAULT_MAX_DECOMPRESSED);
        assert_eq!(ZlibCompressor::new(3).unwrap().max_output(), DEFAULT_MAX_DECOMPRESSED);
    }

    #[test]
    fn capped_stage_reports_compression_error() {
        let stage = compression_stage(Arc::new(ZlibCompressor::default().with_max_output(10)));
        let packed = stage.apply(vec![7u8; 1000]).unwrap();

        let err = stage.invert(packed).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Compression(CompressionError::OutputTooLarge { limit: 10, .. })
        ));
    }

    #[test]
    fn stage_maps_errors_into_pipeline_error() {
        let stage = compression_stage(Arc::new(ZlibCompressor::default()));
        assert_eq!(stage.kind(), &StageKind::Compression);

        let err = stage.invert(vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, PipelineError::Compression(_)));
    }

    #[test]
    fn stage_roundtrips_tiny_payload_that_grows() {
        let stage = compression_stage(Arc::new(ZlibCompressor::new(1).unwrap()));
        let packed = stage.apply(vec![42]).unwrap();
        assert!(packed.len() > 1);
        assert_eq!(stage.invert(packed).unwrap(), vec![42]);
    }

    proptest! {
        #[test]
        fn prop_zlib_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..4096), level in 0u32..=9) {
            let z = ZlibCompressor::new(level).unwrap();
            let packed = z.compress(&data).unwrap();
            prop_assert_eq!(z.decompress(&packed).unwrap(), data);
        }
    }
}
