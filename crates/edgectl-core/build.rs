fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);

    tonic_build::compile_protos("proto/common.proto")?;

    tonic_build::compile_protos("proto/application.proto")?;
    tonic_build::compile_protos("proto/health.proto")?;
    tonic_build::compile_protos("proto/policy.proto")?;

    Ok(())
}
