// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profanity masking for chirp bodies.

/// Words masked in chirp bodies (compared case-insensitively).
pub const DENYLIST: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Replacement for a masked word.
pub const MASK: &str = "****";

/// Mask every denylisted word in `body`.
///
/// Words are separated by single spaces and matched whole, so punctuation
/// attached to a word ("kerfuffle!") prevents a match. Spacing is preserved.
pub fn sanitize(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            let lowered = word.to_lowercase();
            if DENYLIST.contains(&lowered.as_str()) {
                MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
