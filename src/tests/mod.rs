mod charset;
mod dice;

#[cfg(not(feature = "serde"))]
use serde_json as _;
