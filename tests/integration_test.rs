// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rc6::consts::{BLOCK_SIZE, MAX_ROUNDS};
use rc6::*;

fn block(hex_str: &str) -> [u8; BLOCK_SIZE] {
    let mut block = [0; BLOCK_SIZE];
    hex::decode_to_slice(hex_str, &mut block).unwrap();
    block
}

macro_rules! test_known_answer {
    ($name:ident, $key:expr, $pt:expr, $ct:expr) => {
        #[test]
        fn $name() {
            let key = hex::decode($key).unwrap();
            let key_bits = u16::try_from(key.len() * 8).unwrap();
            let mut rc6 = RC6::default();
            rc6.init(&key, key_bits).unwrap();

            let mut data = block($pt);
            rc6.encrypt_block(&mut data).unwrap();
            assert_eq!(hex::encode(data), $ct);

            rc6.decrypt_block(&mut data).unwrap();
            assert_eq!(hex::encode(data), $pt);
        }
    };
}

test_known_answer!(
    known_answer_128_zero,
    "00000000000000000000000000000000",
    "00000000000000000000000000000000",
    "8fc3a53656b1f778c129df4e9848a41e"
);
test_known_answer!(
    known_answer_128,
    "0123456789abcdef0112233445566778",
    "02132435465768798a9bacbdcedfe0f1",
    "524e192f4715c6231f51f6367ea43f18"
);
test_known_answer!(
    known_answer_192_zero,
    "000000000000000000000000000000000000000000000000",
    "00000000000000000000000000000000",
    "6cd61bcb190b30384e8a3f168690ae82"
);
test_known_answer!(
    known_answer_256_zero,
    "0000000000000000000000000000000000000000000000000000000000000000",
    "00000000000000000000000000000000",
    "8f5fbd0510d15fa893fa3fda6e857ec2"
);

#[test]
fn encrypt_decrypt_all_rounds_random() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5243_3620);
    for rounds in 0..=MAX_ROUNDS {
        for _ in 0..8 {
            let key_len = rng.gen_range(1..=64);
            let mut key = vec![0; key_len];
            rng.fill_bytes(&mut key);
            let mut original = [0; BLOCK_SIZE];
            rng.fill_bytes(&mut original);

            let rc6 = RC6::new_with_key(&key, rounds).unwrap();
            let mut data = original;
            rc6.encrypt_block(&mut data).unwrap();
            rc6.decrypt_block(&mut data).unwrap();

            assert_eq!(data, original, "rounds {rounds}, key {}", hex::encode(&key));
        }
    }
}

#[test]
fn encrypt_decrypt_odd_key_bit_lengths() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut key = [0; 32];
    rng.fill_bytes(&mut key);

    for key_bits in 1..=256u16 {
        let mut rc6 = RC6::new(12).unwrap();
        rc6.init(&key, key_bits).unwrap();

        let mut original = [0; BLOCK_SIZE];
        rng.fill_bytes(&mut original);
        let mut data = original;
        RC6Algo::encrypt(&rc6, &mut data).unwrap();
        RC6Algo::decrypt(&rc6, &mut data).unwrap();

        assert_eq!(data, original, "key bits {key_bits}");
    }
}

#[test]
fn encrypt_is_deterministic() {
    let rc6 = RC6::new_with_key(b"my secret key", 20).unwrap();
    let plaintext = *b"hello there !!!!";

    let mut first = plaintext;
    let mut second = plaintext;
    rc6.encrypt_block(&mut first).unwrap();
    rc6.encrypt_block(&mut second).unwrap();

    assert_ne!(first, plaintext);
    assert_eq!(first, second);
}

#[test]
fn same_key_same_ciphertext() {
    let key = b"shared key material";
    let a = RC6::new_with_key(key, 16).unwrap();
    let b = RC6::new_with_key(key, 16).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..32 {
        let mut words = [0u32; 4];
        rng.fill(&mut words[..]);
        let mut words_b = words;

        a.encrypt_words(&mut words).unwrap();
        b.encrypt_words(&mut words_b).unwrap();
        assert_eq!(words, words_b);
    }
}

#[test]
fn round_count_changes_ciphertext() {
    let key = block("000102030405060708090a0b0c0d0e0f");
    let plaintext = block("00112233445566778899aabbccddeeff");

    let rc6_20 = RC6::new_with_key(&key, 20).unwrap();
    let rc6_12 = RC6::new_with_key(&key, 12).unwrap();

    let mut ct_20 = plaintext;
    let mut ct_12 = plaintext;
    rc6_20.encrypt_block(&mut ct_20).unwrap();
    rc6_12.encrypt_block(&mut ct_12).unwrap();
    assert_ne!(ct_20, ct_12);

    rc6_20.decrypt_block(&mut ct_20).unwrap();
    rc6_12.decrypt_block(&mut ct_12).unwrap();
    assert_eq!(ct_20, plaintext);
    assert_eq!(ct_12, plaintext);
}

#[test]
fn uninitialized_use_fails_without_touching_block() {
    let rc6 = RC6::new(20).unwrap();
    let original = block("00112233445566778899aabbccddeeff");

    let mut data = original;
    let res = rc6.encrypt_block(&mut data);
    assert!(matches!(res, Err(RC6AlgoError::NotInitialized)));
    assert_eq!(data, original);

    let res = RC6Algo::decrypt(&rc6, &mut data);
    assert!(matches!(&res, Err(err) if err.kind() == ErrorKind::NotInitialized));
    assert_eq!(data, original);
}

#[test]
fn partial_key_byte_does_not_contribute() {
    let mut rc6_12 = RC6::default();
    rc6_12.init(&[0xAB, 0xCD], 12).unwrap();
    let mut rc6_8 = RC6::default();
    rc6_8.init(&[0xAB], 8).unwrap();

    let mut a = [0; BLOCK_SIZE];
    let mut b = [0; BLOCK_SIZE];
    rc6_12.encrypt_block(&mut a).unwrap();
    rc6_8.encrypt_block(&mut b).unwrap();
    assert_eq!(a, b);
}

#[test]
fn key_bits_select_key_prefix() {
    let key = hex::decode("0123456789abcdef0112233445566778ffffffff").unwrap();
    let mut rc6 = RC6::default();
    rc6.init(&key, 128).unwrap();

    let mut data = block("02132435465768798a9bacbdcedfe0f1");
    rc6.encrypt_block(&mut data).unwrap();
    assert_eq!(hex::encode(data), "524e192f4715c6231f51f6367ea43f18");
}

#[test]
fn failed_init_leaves_instance_uninitialized() {
    let mut rc6 = RC6::default();
    let res = rc6.init(&[1, 2, 3], 32);
    assert!(matches!(res, Err(ref err) if err.kind() == ErrorKind::InvalidArgument));
    assert!(!rc6.is_initialized());

    let mut data = [0; BLOCK_SIZE];
    assert!(rc6.encrypt_block(&mut data).is_err());
}

#[test]
fn dyn_algo() {
    let algo: Box<dyn RC6Algo> = Box::new(RC6::new_with_key(b"my secret key", 12).unwrap());
    let pt_org = *b"0123456789abcdef";
    let mut pt = pt_org;
    let ct = algo.encrypt(&mut pt).unwrap();
    assert_ne!(pt_org[..], ct[..]);
    let decrypted = algo.decrypt(ct).unwrap();
    assert_eq!(pt_org[..], decrypted[..]);
}

#[test]
fn moved_instance_keeps_schedule() {
    let rc6 = RC6::new_with_key(&block("0123456789abcdef0112233445566778"), 20).unwrap();
    let moved = Box::new(rc6);

    let mut data = block("02132435465768798a9bacbdcedfe0f1");
    moved.encrypt_block(&mut data).unwrap();
    assert_eq!(hex::encode(data), "524e192f4715c6231f51f6367ea43f18");
}

#[test]
fn concurrent_encryption() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RC6>();

    let rc6 = RC6::new_with_key(&[0; 16], 20).unwrap();
    let expected = block("8fc3a53656b1f778c129df4e9848a41e");

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..1000 {
                    let mut data = [0; BLOCK_SIZE];
                    rc6.encrypt_block(&mut data).unwrap();
                    assert_eq!(data, expected);
                    rc6.decrypt_block(&mut data).unwrap();
                    assert_eq!(data, [0; BLOCK_SIZE]);
                }
            });
        }
    });
}
