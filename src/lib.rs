#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use xb_bind as bind;
pub use xb_extensions as extensions;
pub use xb_node as node;
pub use xb_utils as utils;
