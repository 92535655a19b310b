// Licensed under the Apache-2.0 license

mod test_challenge;
mod test_firmware_hash;
mod test_framing;
