const MESSAGES: &[&str] = &["User", "GetUserRequest", "GetUserResponse"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = std::env::var("OUT_DIR")?;

    // ReflectMessage gives bodylog the descriptor it needs for proto3 JSON
    let mut builder = tonic_prost_build::configure();
    for message in MESSAGES {
        builder = builder
            .type_attribute(
                format!(".myservice.v1.{message}"),
                "#[derive(::prost_reflect::ReflectMessage)]",
            )
            .type_attribute(
                format!(".myservice.v1.{message}"),
                format!(
                    r#"#[prost_reflect(file_descriptor_set_bytes = "crate::service::pb::FILE_DESCRIPTOR_SET", message_name = "myservice.v1.{message}")]"#
                ),
            );
    }

    builder
        .file_descriptor_set_path(format!("{}/myservice_descriptor.bin", out_dir))
        .compile_protos(&["proto/myservice/v1/myservice.proto"], &["proto"])?;

    Ok(())
}
