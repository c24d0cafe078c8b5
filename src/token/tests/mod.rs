mod decode;
mod resolve;
