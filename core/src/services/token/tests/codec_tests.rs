//! Tests for token encoding and classification

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;
use crate::services::clock::{Clock, ManualClock};
use crate::services::token::{Rs256KeyManager, TokenCodec, TokenVerdict};

use super::{key_manager, OTHER_PRIVATE_KEY, OTHER_PUBLIC_KEY};

fn codec_at(clock: &ManualClock) -> TokenCodec {
    TokenCodec::new(key_manager(), Arc::new(clock.clone()))
}

#[test]
fn test_round_trip_preserves_claims() {
    let clock = ManualClock::starting_now();
    let codec = codec_at(&clock);
    let claims = Claims::refresh("alice", "admin", "jti-1", clock.now() + Duration::hours(72));

    let token = codec.encode(&claims).unwrap();
    let decoded = codec.decode(&token).unwrap();

    assert_eq!(decoded, claims);
}

#[test]
fn test_access_token_omits_jti_on_the_wire() {
    let clock = ManualClock::starting_now();
    let codec = codec_at(&clock);
    let claims = Claims::access("alice", "admin", clock.now() + Duration::minutes(15));

    let token = codec.encode(&claims).unwrap();
    let decoded = codec.decode(&token).unwrap();

    assert!(decoded.jti.is_none());
    assert_eq!(token.split('.').count(), 3);
}

#[test]
fn test_expired_token_is_distinguished_from_garbage() {
    let clock = ManualClock::starting_now();
    let codec = codec_at(&clock);
    let claims = Claims::access("alice", "admin", clock.now() + Duration::minutes(15));
    let token = codec.encode(&claims).unwrap();

    clock.advance(Duration::minutes(16));

    assert_eq!(codec.inspect(&token), TokenVerdict::Expired(claims.clone()));
    assert_eq!(codec.decode(&token), Err(TokenError::Expired));
    assert_eq!(codec.decode_ignoring_expiry(&token), Ok(claims));

    assert_eq!(codec.inspect("garbage"), TokenVerdict::Malformed);
    assert_eq!(codec.decode("garbage"), Err(TokenError::Malformed));
    assert_eq!(codec.decode_ignoring_expiry("garbage"), Err(TokenError::Malformed));
}

#[test]
fn test_token_expires_exactly_at_exp() {
    let clock = ManualClock::new(Utc::now());
    let codec = codec_at(&clock);
    let expires_at = clock.now() + Duration::minutes(15);
    let token = codec
        .encode(&Claims::access("alice", "admin", expires_at))
        .unwrap();

    clock.set(expires_at - Duration::seconds(1));
    assert!(matches!(codec.inspect(&token), TokenVerdict::Valid(_)));

    clock.set(expires_at);
    assert!(matches!(codec.inspect(&token), TokenVerdict::Expired(_)));
}

#[test]
fn test_token_signed_by_foreign_key_is_malformed() {
    let clock = ManualClock::starting_now();
    let codec = codec_at(&clock);
    let foreign = TokenCodec::new(
        Arc::new(Rs256KeyManager::from_pem_strings(OTHER_PRIVATE_KEY, OTHER_PUBLIC_KEY).unwrap()),
        Arc::new(clock.clone()),
    );

    let token = foreign
        .encode(&Claims::access("mallory", "admin", clock.now() + Duration::minutes(15)))
        .unwrap();

    assert_eq!(codec.inspect(&token), TokenVerdict::Malformed);
}

#[test]
fn test_tampered_payload_is_malformed() {
    let clock = ManualClock::starting_now();
    let codec = codec_at(&clock);
    let token = codec
        .encode(&Claims::access("alice", "user", clock.now() + Duration::minutes(15)))
        .unwrap();
    let other = codec
        .encode(&Claims::access("alice", "admin", clock.now() + Duration::minutes(15)))
        .unwrap();

    // Header and signature of the first token around the payload of the second
    let parts: Vec<&str> = token.split('.').collect();
    let other_parts: Vec<&str> = other.split('.').collect();
    let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

    assert_eq!(codec.inspect(&forged), TokenVerdict::Malformed);
}

#[test]
fn test_verdict_helpers() {
    let claims = Claims::access("alice", "admin", Utc::now());

    assert_eq!(TokenVerdict::Valid(claims.clone()).claims(), Some(&claims));
    assert_eq!(TokenVerdict::Expired(claims.clone()).claims(), Some(&claims));
    assert_eq!(TokenVerdict::Malformed.claims(), None);

    assert_eq!(
        TokenVerdict::Expired(claims).into_result(),
        Err(TokenError::Expired)
    );
}
