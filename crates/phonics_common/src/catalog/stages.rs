//! Hand-authored curriculum: six stages of fifteen words each.
//!
//! Stages 1-4 are CVC words for the short vowels. Stage 5 introduces the
//! sh/ch/th digraphs and stage 6 opens every word with a consonant blend,
//! so the first phoneme chunk is two letters there.

/// (text, phonemes, damage, hint)
pub(super) type WordDef = (&'static str, &'static [&'static str], u32, &'static str);

pub(super) struct StageDef {
    pub id: u32,
    pub name: &'static str,
    pub pattern: &'static str,
    pub theme: &'static str,
    pub boss: &'static str,
    pub color: &'static str,
    pub words: &'static [WordDef],
}

pub(super) const BUILTIN_STAGES: &[StageDef] = &[
    StageDef {
        id: 1,
        name: "Cat Meadow",
        pattern: "short a",
        theme: "meadow",
        boss: "Grumble Goat",
        color: "#F4B942",
        words: &[
            ("cat", &["c", "a", "t"], 10, "🐱"),
            ("hat", &["h", "a", "t"], 10, "🎩"),
            ("bat", &["b", "a", "t"], 10, "🦇"),
            ("map", &["m", "a", "p"], 10, "🗺️"),
            ("van", &["v", "a", "n"], 10, "🚐"),
            ("fan", &["f", "a", "n"], 10, "🪭"),
            ("pan", &["p", "a", "n"], 10, "🍳"),
            ("rat", &["r", "a", "t"], 10, "🐀"),
            ("bag", &["b", "a", "g"], 10, "👜"),
            ("cap", &["c", "a", "p"], 10, "🧢"),
            ("jam", &["j", "a", "m"], 10, "🍓"),
            ("ram", &["r", "a", "m"], 10, "🐏"),
            ("mad", &["m", "a", "d"], 10, "😠"),
            ("sad", &["s", "a", "d"], 10, "😢"),
            ("tap", &["t", "a", "p"], 10, "🚰"),
        ],
    },
    StageDef {
        id: 2,
        name: "Pig Pond",
        pattern: "short i",
        theme: "pond",
        boss: "Soggy Toad",
        color: "#6CC4A1",
        words: &[
            ("pig", &["p", "i", "g"], 10, "🐷"),
            ("sit", &["s", "i", "t"], 10, "🪑"),
            ("lip", &["l", "i", "p"], 10, "👄"),
            ("fin", &["f", "i", "n"], 10, "🦈"),
            ("pin", &["p", "i", "n"], 10, "📌"),
            ("bib", &["b", "i", "b"], 10, "🍼"),
            ("dig", &["d", "i", "g"], 10, "⛏️"),
            ("wig", &["w", "i", "g"], 10, "💇"),
            ("kit", &["k", "i", "t"], 10, "🧰"),
            ("hip", &["h", "i", "p"], 10, "🦴"),
            ("zip", &["z", "i", "p"], 10, "🤐"),
            ("mix", &["m", "i", "x"], 10, "🥣"),
            ("six", &["s", "i", "x"], 10, "6️⃣"),
            ("tin", &["t", "i", "n"], 10, "🥫"),
            ("fig", &["f", "i", "g"], 10, "🍈"),
        ],
    },
    StageDef {
        id: 3,
        name: "Fox Forest",
        pattern: "short o",
        theme: "forest",
        boss: "Hollow Owl",
        color: "#4F8A3C",
        words: &[
            ("dog", &["d", "o", "g"], 10, "🐶"),
            ("pot", &["p", "o", "t"], 10, "🍲"),
            ("hop", &["h", "o", "p"], 10, "🐇"),
            ("log", &["l", "o", "g"], 10, "🪵"),
            ("box", &["b", "o", "x"], 10, "📦"),
            ("fox", &["f", "o", "x"], 10, "🦊"),
            ("mop", &["m", "o", "p"], 10, "🧹"),
            ("top", &["t", "o", "p"], 10, "🔝"),
            ("cot", &["c", "o", "t"], 10, "🛏️"),
            ("hot", &["h", "o", "t"], 10, "🔥"),
            ("dot", &["d", "o", "t"], 10, "⚫"),
            ("rod", &["r", "o", "d"], 10, "🎣"),
            ("jog", &["j", "o", "g"], 10, "🏃"),
            ("fog", &["f", "o", "g"], 10, "🌫️"),
            ("sob", &["s", "o", "b"], 10, "😭"),
        ],
    },
    StageDef {
        id: 4,
        name: "Bug Beach",
        pattern: "short e and u",
        theme: "beach",
        boss: "Sandy Sprite",
        color: "#5BC0EB",
        words: &[
            ("bed", &["b", "e", "d"], 12, "🛏️"),
            ("hen", &["h", "e", "n"], 12, "🐔"),
            ("net", &["n", "e", "t"], 12, "🥅"),
            ("pen", &["p", "e", "n"], 12, "🖊️"),
            ("leg", &["l", "e", "g"], 12, "🦵"),
            ("web", &["w", "e", "b"], 12, "🕸️"),
            ("ten", &["t", "e", "n"], 12, "🔟"),
            ("jet", &["j", "e", "t"], 12, "✈️"),
            ("bug", &["b", "u", "g"], 12, "🐛"),
            ("cup", &["c", "u", "p"], 12, "☕"),
            ("sun", &["s", "u", "n"], 12, "☀️"),
            ("bus", &["b", "u", "s"], 12, "🚌"),
            ("mud", &["m", "u", "d"], 12, "🟤"),
            ("hug", &["h", "u", "g"], 12, "🤗"),
            ("nut", &["n", "u", "t"], 12, "🥜"),
        ],
    },
    StageDef {
        id: 5,
        name: "Shipwreck Shore",
        pattern: "digraphs sh ch th",
        theme: "harbor",
        boss: "Captain Chomp",
        color: "#3D5A80",
        words: &[
            ("ship", &["sh", "i", "p"], 15, "🚢"),
            ("shop", &["sh", "o", "p"], 15, "🏪"),
            ("fish", &["f", "i", "sh"], 15, "🐟"),
            ("dish", &["d", "i", "sh"], 15, "🍽️"),
            ("chip", &["ch", "i", "p"], 15, "🍟"),
            ("chin", &["ch", "i", "n"], 15, "🧔"),
            ("chop", &["ch", "o", "p"], 15, "🪓"),
            ("thin", &["th", "i", "n"], 15, "📏"),
            ("moth", &["m", "o", "th"], 15, "🦋"),
            ("bath", &["b", "a", "th"], 15, "🛁"),
            ("math", &["m", "a", "th"], 15, "➗"),
            ("rich", &["r", "i", "ch"], 15, "💰"),
            ("much", &["m", "u", "ch"], 15, "🫙"),
            ("shed", &["sh", "e", "d"], 15, "🏚️"),
            ("with", &["w", "i", "th"], 15, "🤝"),
        ],
    },
    StageDef {
        id: 6,
        name: "Blend Mountain",
        pattern: "initial blends",
        theme: "mountain",
        boss: "Frost Dragon",
        color: "#9B5DE5",
        words: &[
            ("stop", &["st", "o", "p"], 20, "🛑"),
            ("flag", &["fl", "a", "g"], 20, "🚩"),
            ("frog", &["fr", "o", "g"], 20, "🐸"),
            ("crab", &["cr", "a", "b"], 20, "🦀"),
            ("drum", &["dr", "u", "m"], 20, "🥁"),
            ("clap", &["cl", "a", "p"], 20, "👏"),
            ("sled", &["sl", "e", "d"], 20, "🛷"),
            ("swim", &["sw", "i", "m"], 20, "🏊"),
            ("plum", &["pl", "u", "m"], 20, "🟣"),
            ("grin", &["gr", "i", "n"], 20, "😁"),
            ("snap", &["sn", "a", "p"], 20, "🫰"),
            ("trip", &["tr", "i", "p"], 20, "🧳"),
            ("spot", &["sp", "o", "t"], 20, "🔴"),
            ("brick", &["br", "i", "ck"], 25, "🧱"),
            ("glad", &["gl", "a", "d"], 20, "😊"),
        ],
    },
];
