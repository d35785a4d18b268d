//! The encode/decode pipeline.
//!
//! ```text
//! write: T → codec → bytes → encrypt → ciphertext → base64 → String
//! read:  String → base64 → ciphertext → decrypt → bytes → codec → T
//! ```
//!
//! The fallback methods ([`encode`](EncodingPipeline::encode),
//! [`decode`](EncodingPipeline::decode),
//! [`read_and_decode`](EncodingPipeline::read_and_decode)) never fail.
//! A failed stage is logged and turned into `None` or the caller's default.
//! The `try_*` methods expose the same stages with their [`Error`].

use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

use secpref::{EncryptionAlgorithm, PreferenceStore, ValueCodec};
use serde::{Serialize, de::DeserializeOwned};

use crate::{error::Error, json::JsonCodec, text};

/// Serialize → encrypt → base64 on write, the reverse on read.
///
/// The algorithm is bound once at construction and never swapped. The
/// pipeline holds no other state, so a shared reference can be used from
/// many threads at once.
pub struct EncodingPipeline<C = JsonCodec> {
    algorithm: Arc<dyn EncryptionAlgorithm>,
    codec: C,
}

impl EncodingPipeline<JsonCodec> {
    /// Binds `algorithm` for the lifetime of the pipeline, serializing
    /// values as JSON. The algorithm is not exercised until first use.
    pub fn new(algorithm: impl EncryptionAlgorithm + 'static) -> Self {
        Self::with_codec(algorithm, JsonCodec)
    }
}

impl<C: ValueCodec> EncodingPipeline<C> {
    /// Like [`new`](EncodingPipeline::new) with a custom [`ValueCodec`].
    pub fn with_codec(algorithm: impl EncryptionAlgorithm + 'static, codec: C) -> Self {
        Self::from_shared(Arc::new(algorithm), codec)
    }

    /// Builds a pipeline over an algorithm that is already shared elsewhere.
    pub fn from_shared(algorithm: Arc<dyn EncryptionAlgorithm>, codec: C) -> Self {
        EncodingPipeline { algorithm, codec }
    }

    /// The bound algorithm.
    pub fn algorithm(&self) -> &dyn EncryptionAlgorithm {
        self.algorithm.as_ref()
    }

    /// The codec values are serialized with.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Serializes, encrypts and base64 encodes `value`.
    ///
    /// # Errors
    ///
    /// [`Error::Serialization`] or [`Error::Encryption`] from the failing
    /// stage.
    pub fn try_encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, Error> {
        let plain = self.codec.serialize(value)?;
        let sealed = self.algorithm.encrypt(&plain)?;
        tracing::debug!(
            algorithm = self.algorithm.name(),
            plain_len = plain.len(),
            sealed_len = sealed.len(),
            "encoded value"
        );
        Ok(text::encode(&sealed))
    }

    /// Reverses [`try_encode`](Self::try_encode).
    ///
    /// # Errors
    ///
    /// [`Error::Format`] for text that is not padded base64, otherwise
    /// [`Error::Encryption`] or [`Error::Serialization`] from the failing
    /// stage.
    pub fn try_decode<T: DeserializeOwned>(&self, encoded: &str) -> Result<T, Error> {
        let sealed = text::decode(encoded)?;
        let plain = self.algorithm.decrypt(&sealed)?;
        let value = self.codec.deserialize(&plain)?;
        tracing::debug!(
            algorithm = self.algorithm.name(),
            sealed_len = sealed.len(),
            plain_len = plain.len(),
            "decoded value"
        );
        Ok(value)
    }

    /// Encodes `value`, or returns `None` when it is absent or any stage
    /// fails. An absent value never reaches the codec or the algorithm.
    pub fn encode<T: Serialize + ?Sized>(&self, value: Option<&T>) -> Option<String> {
        self.encode_value(value?)
    }

    /// Like [`encode`](Self::encode) for a value that is always present.
    pub fn encode_value<T: Serialize + ?Sized>(&self, value: &T) -> Option<String> {
        match self.try_encode(value) {
            Ok(encoded) => Some(encoded),
            Err(e) => {
                tracing::error!(algorithm = self.algorithm.name(), error = %e, "error encoding value");
                None
            }
        }
    }

    /// Decodes `encoded`, or hands back `default` when it is absent or
    /// any stage fails.
    pub fn decode<T: DeserializeOwned>(&self, encoded: Option<&str>, default: T) -> T {
        self.decode_or(None, encoded, default)
    }

    /// Reads `key` from `store` and decodes it with the same fallback as
    /// [`decode`](Self::decode). An unset key yields `default`.
    pub fn read_and_decode<S, T>(&self, store: &S, key: &str, default: T) -> T
    where
        S: PreferenceStore + ?Sized,
        T: DeserializeOwned,
    {
        let stored = store.get_string(key);
        self.decode_or(Some(key), stored.as_deref(), default)
    }

    fn decode_or<T: DeserializeOwned>(&self, key: Option<&str>, encoded: Option<&str>, default: T) -> T {
        let Some(encoded) = encoded else {
            if let Some(key) = key {
                tracing::trace!(key, "no value stored, using default");
            }
            return default;
        };
        match self.try_decode(encoded) {
            Ok(value) => value,
            Err(e) => {
                match key {
                    Some(key) => {
                        tracing::error!(key, algorithm = self.algorithm.name(), error = %e, "error reading value by key")
                    }
                    None => tracing::error!(algorithm = self.algorithm.name(), error = %e, "error reading value"),
                }
                default
            }
        }
    }
}

impl<C: Debug> Debug for EncodingPipeline<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodingPipeline")
            .field("algorithm", &self.algorithm.name())
            .field("codec", &self.codec)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        io,
        sync::{
            Arc, Mutex,
            atomic::{AtomicUsize, Ordering},
        },
        thread,
    };

    use rstest::{fixture, rstest};
    use secpref::{EncryptionAlgorithm, EncryptionError, SerializationError};
    use secpref_cipher::{AesGcmCipher, Passthrough, XorCipher};
    use serde::{Deserialize, Serialize};
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    use super::EncodingPipeline;
    use crate::error::Error;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Session {
        user: String,
        expires_at: u64,
        scopes: Vec<String>,
    }

    fn session() -> Session {
        Session {
            user: "alice".to_string(),
            expires_at: 1_700_000_000,
            scopes: vec!["read".to_string(), "write".to_string()],
        }
    }

    /// Counts every call into the algorithm.
    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl EncryptionAlgorithm for Counting {
        fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(plaintext.to_vec())
        }

        fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ciphertext.to_vec())
        }
    }

    struct Failing;

    impl EncryptionAlgorithm for Failing {
        fn encrypt(&self, _: &[u8]) -> Result<Vec<u8>, EncryptionError> {
            Err(EncryptionError::Encrypt("refused".to_string()))
        }

        fn decrypt(&self, _: &[u8]) -> Result<Vec<u8>, EncryptionError> {
            Err(EncryptionError::Decrypt("refused".to_string()))
        }
    }

    #[fixture]
    fn xor() -> EncodingPipeline {
        EncodingPipeline::new(XorCipher::new(vec![0x5a, 0x13, 0x77]).unwrap())
    }

    #[rstest]
    fn test_scenario_integer_42(xor: EncodingPipeline) {
        let encoded = xor.encode(Some(&42)).unwrap();
        assert!(!encoded.is_empty());
        assert_eq!(42, xor.decode(Some(&encoded), 0));

        let truncated = &encoded[..encoded.len() - 1];
        assert_eq!(0, xor.decode(Some(truncated), 0));
    }

    #[rstest]
    #[case::passthrough(EncodingPipeline::new(Passthrough))]
    #[case::xor(EncodingPipeline::new(XorCipher::new(b"k".to_vec()).unwrap()))]
    #[case::aes_gcm(EncodingPipeline::new(AesGcmCipher::new(&[3u8; 32]).unwrap()))]
    fn test_roundtrip(#[case] pipeline: EncodingPipeline) {
        let encoded = pipeline.encode_value(&session()).unwrap();
        let fallback = Session {
            user: String::new(),
            expires_at: 0,
            scopes: vec![],
        };
        assert_eq!(session(), pipeline.decode(Some(&encoded), fallback));

        let text = pipeline.encode_value("hello").unwrap();
        assert_eq!("hello", pipeline.decode::<String>(Some(&text), String::new()));

        let missing: Option<u32> = None;
        let encoded = pipeline.encode_value(&missing).unwrap();
        assert_eq!(None, pipeline.decode(Some(&encoded), Some(7u32)));
    }

    #[test]
    fn test_encode_absent_skips_algorithm() {
        let counting = Arc::new(Counting::default());
        let pipeline = EncodingPipeline::from_shared(counting.clone(), crate::JsonCodec);

        assert_eq!(None, pipeline.encode::<u32>(None));
        assert_eq!(0, counting.calls.load(Ordering::SeqCst));

        assert!(pipeline.encode(Some(&1u32)).is_some());
        assert_eq!(1, counting.calls.load(Ordering::SeqCst));
    }

    #[test]
    fn test_decode_absent_skips_algorithm() {
        let counting = Arc::new(Counting::default());
        let pipeline = EncodingPipeline::from_shared(counting.clone(), crate::JsonCodec);

        assert_eq!(5, pipeline.decode(None, 5));
        assert_eq!(0, counting.calls.load(Ordering::SeqCst));
    }

    #[test]
    fn test_encode_failure_is_none() {
        let pipeline = EncodingPipeline::new(Failing);
        assert_eq!(None, pipeline.encode(Some(&1)));
        assert_eq!(
            Err(Error::Encryption(EncryptionError::Encrypt("refused".to_string()))),
            pipeline.try_encode(&1)
        );
    }

    #[rstest]
    fn test_encode_unserializable_is_none(xor: EncodingPipeline) {
        let mut map = HashMap::new();
        map.insert((1, 2), "tuple keys are not json");
        assert_eq!(None, xor.encode(Some(&map)));
        assert!(matches!(
            xor.try_encode(&map),
            Err(Error::Serialization(SerializationError::Serialize(_)))
        ));
    }

    #[rstest]
    #[case::not_base64("not base64!")]
    #[case::missing_padding("NDI")]
    #[case::whitespace(" NDI= ")]
    fn test_decode_bad_text_is_default(xor: EncodingPipeline, #[case] input: &str) {
        assert_eq!(-1, xor.decode(Some(input), -1));
        assert!(matches!(xor.try_decode::<i32>(input), Err(Error::Format(_))));
    }

    #[test]
    fn test_decode_corrupt_payload_is_default() {
        let pipeline = EncodingPipeline::new(Passthrough);
        // valid base64 of 0xff 0xff 0xff, which is not JSON
        assert_eq!(9, pipeline.decode(Some("////"), 9));
        assert!(matches!(
            pipeline.try_decode::<u8>("////"),
            Err(Error::Serialization(SerializationError::Deserialize(_)))
        ));
    }

    #[rstest]
    fn test_decode_wrong_type_is_default(xor: EncodingPipeline) {
        let encoded = xor.encode_value("a string").unwrap();
        assert_eq!(3u64, xor.decode(Some(&encoded), 3u64));
    }

    #[test]
    fn test_decode_decrypt_failure_is_default() {
        let pipeline = EncodingPipeline::new(Failing);
        assert_eq!("fallback", pipeline.decode(Some("NDI="), "fallback".to_string()));
        assert_eq!(
            Err(Error::Encryption(EncryptionError::Decrypt("refused".to_string()))),
            pipeline.try_decode::<u8>("NDI=")
        );
    }

    #[test]
    fn test_decode_with_foreign_key_is_default() {
        let writer = EncodingPipeline::new(AesGcmCipher::new(&[1u8; 32]).unwrap());
        let reader = EncodingPipeline::new(AesGcmCipher::new(&[2u8; 32]).unwrap());
        let encoded = writer.encode_value(&42).unwrap();
        assert_eq!(0, reader.decode(Some(&encoded), 0));
    }

    #[rstest]
    #[case::empty("")]
    #[case::padding_only("====")]
    #[case::unicode("ありがとう")]
    #[case::control("\u{0}\u{1}\u{7f}")]
    #[case::long_garbage(&"A".repeat(4097))]
    fn test_adversarial_input_never_panics(#[case] input: &str) {
        let pipelines = [
            EncodingPipeline::new(Passthrough),
            EncodingPipeline::new(XorCipher::new(vec![1]).unwrap()),
            EncodingPipeline::new(AesGcmCipher::new(&[0u8; 32]).unwrap()),
        ];
        for pipeline in pipelines {
            assert_eq!(11, pipeline.decode(Some(input), 11));
            assert_eq!(None, pipeline.decode::<Option<String>>(Some(input), None));
        }
    }

    #[rstest]
    fn test_read_and_decode(xor: EncodingPipeline) {
        let mut store = HashMap::new();
        store.insert("count".to_string(), xor.encode_value(&42).unwrap());
        store.insert("broken".to_string(), "%%%".to_string());

        assert_eq!(42, xor.read_and_decode(&store, "count", 0));
        assert_eq!(0, xor.read_and_decode(&store, "missing-key", 0));
        assert_eq!(0, xor.read_and_decode(&store, "broken", 0));
    }

    #[test]
    fn test_default_is_returned_verbatim() {
        let pipeline = EncodingPipeline::new(Passthrough);
        let default = vec![1, 2, 3];
        let ptr = default.as_ptr();
        let got: Vec<i32> = pipeline.decode(Some("@@@@"), default);
        assert_eq!(ptr, got.as_ptr());
    }

    #[test]
    fn test_concurrent_use() {
        let pipeline = Arc::new(EncodingPipeline::new(AesGcmCipher::new(&[9u8; 32]).unwrap()));
        let handles = (0..8u32)
            .map(|i| {
                let pipeline = Arc::clone(&pipeline);
                thread::spawn(move || {
                    let encoded = pipeline.encode_value(&i).unwrap();
                    pipeline.decode(Some(&encoded), u32::MAX)
                })
            })
            .collect::<Vec<_>>();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(i as u32, handle.join().unwrap());
        }
    }

    #[rstest]
    fn test_debug_names_algorithm(xor: EncodingPipeline) {
        let printed = format!("{xor:?}");
        assert!(printed.contains("xor"));
        assert!(printed.contains("JsonCodec"));
        assert_eq!("xor", xor.algorithm().name());
        assert_eq!(&crate::JsonCodec, xor.codec());
    }

    /// Collects formatted log output of the current thread.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .with_max_level(Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.text()
    }

    #[rstest]
    fn test_read_failure_is_logged_with_key(xor: EncodingPipeline) {
        let mut store = HashMap::new();
        store.insert("session".to_string(), "%%%".to_string());

        let logs = capture_logs(|| {
            assert_eq!(0, xor.read_and_decode(&store, "session", 0));
        });
        let line = logs
            .lines()
            .find(|l| l.contains("error reading value by key"))
            .unwrap();
        assert!(line.contains("ERROR"));
        assert!(line.contains("key=\"session\""));
        assert!(line.contains("algorithm=\"xor\""));
        assert!(line.contains("format"));
    }

    #[rstest]
    fn test_decode_failure_is_logged(xor: EncodingPipeline) {
        let logs = capture_logs(|| {
            assert_eq!(0, xor.decode(Some("%%%"), 0));
        });
        let line = logs
            .lines()
            .find(|l| l.contains("error reading value"))
            .unwrap();
        assert!(line.contains("ERROR"));
        assert!(!line.contains("key="));
    }

    #[test]
    fn test_encode_failure_is_logged() {
        let pipeline = EncodingPipeline::new(Failing);
        let logs = capture_logs(|| {
            assert_eq!(None, pipeline.encode(Some(&1)));
        });
        let line = logs
            .lines()
            .find(|l| l.contains("error encoding value"))
            .unwrap();
        assert!(line.contains("ERROR"));
        assert!(line.contains("refused"));
    }

    #[rstest]
    fn test_success_logs_no_errors(xor: EncodingPipeline) {
        let logs = capture_logs(|| {
            let encoded = xor.encode_value(&42).unwrap();
            assert_eq!(42, xor.decode(Some(&encoded), 0));
        });
        assert!(!logs.contains("ERROR"));
        assert!(logs.contains("decoded value"));
    }
}
