//! Protobuf messages for `bank.Auth`.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RenewAccessTokenRequest {
    #[prost(string, tag = "1")]
    pub refresh_token: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RenewAccessTokenResponse {
    #[prost(string, tag = "1")]
    pub access_token: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub access_token_expires_at: ::core::option::Option<::prost_types::Timestamp>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct WhoAmIRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WhoAmIResponse {
    #[prost(string, tag = "1")]
    pub username: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub token_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub issued_at: ::core::option::Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "4")]
    pub expires_at: ::core::option::Option<::prost_types::Timestamp>,
}

/// Converts a UTC timestamp to its protobuf form.
pub fn timestamp(at: chrono::DateTime<chrono::Utc>) -> ::prost_types::Timestamp {
    ::prost_types::Timestamp {
        seconds: at.timestamp(),
        nanos: at.timestamp_subsec_nanos() as i32,
    }
}
