//! Protobuf fixtures for unit tests
//!
//! Descriptors are assembled in code so the tests run without `protoc`. They mirror
//! what `protoc` would emit for:
//!
//! ```proto
//! syntax = "proto3";
//! package bodylog.test;
//!
//! message User { string user_id = 1; string name = 2; }
//! message GetUserRequest { string user_id = 1; }
//! message GetUserResponse { User user = 1; }
//!
//! enum Role { ROLE_UNSPECIFIED = 0; ROLE_ADMIN = 1; }
//! message Profile { string display_name = 1; }
//! message Account {
//!   string user_id = 1;
//!   optional int32 retries = 2;
//!   map<string, int32> scores = 3;
//!   int64 big = 4;
//!   Role role = 5;
//!   repeated string tags = 6;
//!   Profile profile = 7;
//! }
//!
//! // the Rust type below writes a string at tag 1
//! message Mismatched { int64 count = 1; }
//! ```

use prost_reflect::{DescriptorPool, MessageDescriptor, ReflectMessage};
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, FileDescriptorSet, MessageOptions, OneofDescriptorProto,
};
use std::collections::HashMap;
use std::sync::LazyLock;

const PACKAGE: &str = "bodylog.test";

static POOL: LazyLock<DescriptorPool> = LazyLock::new(|| {
    DescriptorPool::from_file_descriptor_set(file_set()).expect("fixture descriptors are valid")
});

#[derive(Clone, PartialEq, prost::Message)]
pub struct User {
    #[prost(string, tag = "1")]
    pub user_id: String,
    #[prost(string, tag = "2")]
    pub name: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetUserRequest {
    #[prost(string, tag = "1")]
    pub user_id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetUserResponse {
    #[prost(message, optional, tag = "1")]
    pub user: Option<User>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Role {
    Unspecified = 0,
    Admin = 1,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Profile {
    #[prost(string, tag = "1")]
    pub display_name: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Account {
    #[prost(string, tag = "1")]
    pub user_id: String,
    #[prost(int32, optional, tag = "2")]
    pub retries: Option<i32>,
    #[prost(map = "string, int32", tag = "3")]
    pub scores: HashMap<String, i32>,
    #[prost(int64, tag = "4")]
    pub big: i64,
    #[prost(enumeration = "Role", tag = "5")]
    pub role: i32,
    #[prost(string, repeated, tag = "6")]
    pub tags: Vec<String>,
    #[prost(message, optional, tag = "7")]
    pub profile: Option<Profile>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Mismatched {
    #[prost(string, tag = "1")]
    pub label: String,
}

macro_rules! reflect_fixture {
    ($($ty:ident),+) => {
        $(
            impl ReflectMessage for $ty {
                fn descriptor(&self) -> MessageDescriptor {
                    descriptor(stringify!($ty))
                }
            }
        )+
    };
}

reflect_fixture!(User, GetUserRequest, GetUserResponse, Profile, Account, Mismatched);

fn descriptor(name: &str) -> MessageDescriptor {
    let full_name = format!("{PACKAGE}.{name}");
    POOL.get_message_by_name(&full_name)
        .unwrap_or_else(|| panic!("no fixture descriptor for {full_name}"))
}

fn field(name: &str, json_name: &str, number: i32, ty: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        json_name: Some(json_name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(ty as i32),
        ..Default::default()
    }
}

fn named(mut field: FieldDescriptorProto, type_name: &str) -> FieldDescriptorProto {
    field.type_name = Some(format!(".{PACKAGE}.{type_name}"));
    field
}

fn repeated(mut field: FieldDescriptorProto) -> FieldDescriptorProto {
    field.label = Some(Label::Repeated as i32);
    field
}

fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields,
        ..Default::default()
    }
}

fn account() -> DescriptorProto {
    let mut retries = field("retries", "retries", 2, Type::Int32);
    retries.oneof_index = Some(0);
    retries.proto3_optional = Some(true);

    let mut scores_entry = message(
        "ScoresEntry",
        vec![
            field("key", "key", 1, Type::String),
            field("value", "value", 2, Type::Int32),
        ],
    );
    scores_entry.options = Some(MessageOptions {
        map_entry: Some(true),
        ..Default::default()
    });

    let mut account = message(
        "Account",
        vec![
            field("user_id", "userId", 1, Type::String),
            retries,
            repeated(named(
                field("scores", "scores", 3, Type::Message),
                "Account.ScoresEntry",
            )),
            field("big", "big", 4, Type::Int64),
            named(field("role", "role", 5, Type::Enum), "Role"),
            repeated(field("tags", "tags", 6, Type::String)),
            named(field("profile", "profile", 7, Type::Message), "Profile"),
        ],
    );
    account.nested_type = vec![scores_entry];
    account.oneof_decl = vec![OneofDescriptorProto {
        name: Some("_retries".to_string()),
        ..Default::default()
    }];
    account
}

fn role() -> EnumDescriptorProto {
    let value = |name: &str, number: i32| EnumValueDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        ..Default::default()
    };
    EnumDescriptorProto {
        name: Some("Role".to_string()),
        value: vec![value("ROLE_UNSPECIFIED", 0), value("ROLE_ADMIN", 1)],
        ..Default::default()
    }
}

fn file_set() -> FileDescriptorSet {
    let file = FileDescriptorProto {
        name: Some("bodylog/test/fixtures.proto".to_string()),
        package: Some(PACKAGE.to_string()),
        syntax: Some("proto3".to_string()),
        message_type: vec![
            message(
                "User",
                vec![
                    field("user_id", "userId", 1, Type::String),
                    field("name", "name", 2, Type::String),
                ],
            ),
            message(
                "GetUserRequest",
                vec![field("user_id", "userId", 1, Type::String)],
            ),
            message(
                "GetUserResponse",
                vec![named(field("user", "user", 1, Type::Message), "User")],
            ),
            message(
                "Profile",
                vec![field("display_name", "displayName", 1, Type::String)],
            ),
            account(),
            message("Mismatched", vec![field("count", "count", 1, Type::Int64)]),
        ],
        enum_type: vec![role()],
        ..Default::default()
    };
    FileDescriptorSet { file: vec![file] }
}
