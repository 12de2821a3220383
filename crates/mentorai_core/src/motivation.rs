//! crates/mentorai_core/src/motivation.rs
//!
//! The static content provider behind the motivation endpoint: a fixed,
//! read-only pool of quotes and uniform random selection over it. Nothing
//! here touches the store.

use rand::Rng;

/// One motivational quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

/// The fixed pool served by `GET /api/motivation`.
pub const POOL: &[Quote] = &[
    Quote {
        text: "Ogni giorno è una nuova opportunità per diventare la versione migliore di te.",
        author: "MentorAI",
    },
    Quote {
        text: "Fai oggi ciò che altri non vogliono, domani vivrai come altri non possono.",
        author: "Anonimo",
    },
    Quote {
        text: "La disciplina batte la motivazione.",
        author: "MentorAI",
    },
    Quote {
        text: "Picchi piccoli, costanza grande: il progresso è la somma di passi minuscoli.",
        author: "MentorAI",
    },
    Quote {
        text: "Il successo è l’abitudine di fare bene le piccole cose.",
        author: "MentorAI",
    },
];

/// Picks one quote uniformly at random from the pool.
pub fn random_quote() -> &'static Quote {
    let index = rand::thread_rng().gen_range(0..POOL.len());
    &POOL[index]
}
