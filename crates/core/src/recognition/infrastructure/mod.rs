pub mod execution_provider;
pub mod model_resolver;
pub mod onnx_face_encoder;
pub mod onnx_face_locator;
