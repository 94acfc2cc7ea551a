//! `Echo` message with a descriptor assembled in code, standing in for
//! `message Echo { string user_id = 1; string note = 2; }` in package `echo.v1`

use prost_reflect::{DescriptorPool, MessageDescriptor, ReflectMessage};
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet};
use std::sync::LazyLock;

static POOL: LazyLock<DescriptorPool> = LazyLock::new(|| {
    let field = |name: &str, json_name: &str, number: i32| FieldDescriptorProto {
        name: Some(name.to_string()),
        json_name: Some(json_name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(Type::String as i32),
        ..Default::default()
    };
    let file = FileDescriptorProto {
        name: Some("echo/v1/echo.proto".to_string()),
        package: Some("echo.v1".to_string()),
        syntax: Some("proto3".to_string()),
        message_type: vec![DescriptorProto {
            name: Some("Echo".to_string()),
            field: vec![field("user_id", "userId", 1), field("note", "note", 2)],
            ..Default::default()
        }],
        ..Default::default()
    };
    DescriptorPool::from_file_descriptor_set(FileDescriptorSet { file: vec![file] })
        .expect("echo descriptor is valid")
});

#[derive(Clone, PartialEq, prost::Message)]
pub struct Echo {
    #[prost(string, tag = "1")]
    pub user_id: String,
    #[prost(string, tag = "2")]
    pub note: String,
}

impl ReflectMessage for Echo {
    fn descriptor(&self) -> MessageDescriptor {
        POOL.get_message_by_name("echo.v1.Echo")
            .expect("Echo is in the pool")
    }
}

bodylog::structured_payload!(Echo);

impl Echo {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            note: String::new(),
        }
    }
}
