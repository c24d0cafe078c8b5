use rand::thread_rng;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::sync::OnceLock;

/// A process-wide RSA test key; 2048-bit generation is slow enough to share.
pub fn rsa_private_key_pem() -> &'static str {
    static PEM: OnceLock<String> = OnceLock::new();
    PEM.get_or_init(|| {
        let mut rng = thread_rng();
        let key = RsaPrivateKey::new(&mut rng, 2048).expect("private key");
        key.to_pkcs1_pem(LineEnding::LF)
            .expect("private key pem")
            .to_string()
    })
    .as_str()
}

/// Public modulus and exponent of the shared test key, big-endian.
pub fn rsa_public_components() -> (Vec<u8>, Vec<u8>) {
    let private_key = RsaPrivateKey::from_pkcs1_pem(rsa_private_key_pem()).expect("private key");
    let public_key = RsaPublicKey::from(&private_key);
    (public_key.n().to_bytes_be(), public_key.e().to_bytes_be())
}
