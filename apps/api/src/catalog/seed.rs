//! Built-in catalog used when no `QUESTION_BANK_PATH` is configured.

use uuid::Uuid;

use crate::models::question::{Difficulty, Question};

struct SeedQuestion {
    domain: &'static str,
    difficulty: Difficulty,
    category: &'static str,
    prompt: &'static str,
    model_answer: &'static str,
    keywords: &'static [&'static str],
}

const SEED: &[SeedQuestion] = &[
    // frontend
    SeedQuestion {
        domain: "frontend",
        difficulty: Difficulty::Easy,
        category: "react",
        prompt: "What is React and why is it popular?",
        model_answer: "React is a JavaScript library for building user interfaces with reusable components. It uses a virtual DOM for efficient updates and a declarative style that makes UI state easy to reason about.",
        keywords: &["component", "virtual dom", "declarative", "reusable"],
    },
    SeedQuestion {
        domain: "frontend",
        difficulty: Difficulty::Easy,
        category: "css",
        prompt: "Explain the CSS box model.",
        model_answer: "Every element is a box made of content, padding, border and margin. The box-sizing property decides whether width includes padding and border.",
        keywords: &["content", "padding", "border", "margin"],
    },
    SeedQuestion {
        domain: "frontend",
        difficulty: Difficulty::Medium,
        category: "react",
        prompt: "What are React hooks and what problem do they solve?",
        model_answer: "Hooks such as useState and useEffect let function components hold state and run side effects. They replace class lifecycle methods and make stateful logic reusable through custom hooks.",
        keywords: &["usestate", "useeffect", "state", "side effects"],
    },
    SeedQuestion {
        domain: "frontend",
        difficulty: Difficulty::Medium,
        category: "javascript",
        prompt: "Explain the JavaScript event loop.",
        model_answer: "JavaScript runs on a single thread. The event loop takes tasks from the callback queue when the call stack is empty, and microtasks such as promise callbacks run before the next task.",
        keywords: &["call stack", "callback queue", "microtask", "single thread"],
    },
    SeedQuestion {
        domain: "frontend",
        difficulty: Difficulty::Hard,
        category: "performance",
        prompt: "How would you diagnose and fix a slow rendering React page?",
        model_answer: "Profile with the React profiler to find components that re-render too often. Memoize expensive components and values, virtualize long lists, split code so less JavaScript loads, and avoid layout thrashing.",
        keywords: &["profiler", "memoize", "virtualize", "code splitting"],
    },
    // backend
    SeedQuestion {
        domain: "backend",
        difficulty: Difficulty::Easy,
        category: "http",
        prompt: "What is the difference between GET and POST?",
        model_answer: "GET retrieves a resource and should be safe and idempotent with parameters in the URL. POST submits data in the request body and usually creates or changes server state.",
        keywords: &["idempotent", "request body", "safe", "resource"],
    },
    SeedQuestion {
        domain: "backend",
        difficulty: Difficulty::Easy,
        category: "databases",
        prompt: "What is a database index?",
        model_answer: "An index is a data structure, usually a B-tree, that lets the database find rows without scanning the whole table. It speeds up reads at the cost of extra storage and slower writes.",
        keywords: &["b-tree", "scan", "reads", "writes"],
    },
    SeedQuestion {
        domain: "backend",
        difficulty: Difficulty::Medium,
        category: "databases",
        prompt: "Explain database transactions and ACID.",
        model_answer: "A transaction groups operations so they succeed or fail together. ACID means atomicity, consistency, isolation and durability, which keep data correct under concurrency and crashes.",
        keywords: &["atomicity", "consistency", "isolation", "durability"],
    },
    SeedQuestion {
        domain: "backend",
        difficulty: Difficulty::Medium,
        category: "api",
        prompt: "How do you secure a REST API?",
        model_answer: "Use TLS everywhere, authenticate with tokens such as JWT or OAuth, authorize every request, validate input, rate limit clients and never leak internal errors.",
        keywords: &["tls", "authentication", "authorization", "rate limit"],
    },
    SeedQuestion {
        domain: "backend",
        difficulty: Difficulty::Hard,
        category: "distributed systems",
        prompt: "Explain the CAP theorem.",
        model_answer: "A distributed system facing a network partition must choose between consistency and availability. Without a partition it can provide both, so the real trade-off is made when partitions happen.",
        keywords: &["consistency", "availability", "partition", "trade-off"],
    },
    // fullstack
    SeedQuestion {
        domain: "fullstack",
        difficulty: Difficulty::Easy,
        category: "web",
        prompt: "What happens when you type a URL into a browser?",
        model_answer: "The browser resolves the domain through DNS, opens a TCP and TLS connection, sends an HTTP request, receives the response and then parses and renders the HTML, CSS and JavaScript.",
        keywords: &["dns", "tcp", "http", "render"],
    },
    SeedQuestion {
        domain: "fullstack",
        difficulty: Difficulty::Medium,
        category: "auth",
        prompt: "Compare session cookies and JWT authentication.",
        model_answer: "Session cookies keep state on the server and send an opaque id. JWTs are signed tokens carrying claims so the server stays stateless, but they are harder to revoke before expiry.",
        keywords: &["stateless", "signed", "revoke", "claims"],
    },
    SeedQuestion {
        domain: "fullstack",
        difficulty: Difficulty::Hard,
        category: "architecture",
        prompt: "How would you design real-time notifications for a web app?",
        model_answer: "Push events from the backend through WebSockets or server-sent events, fan out with a message broker, persist notifications for offline users and fall back to polling when connections fail.",
        keywords: &["websockets", "message broker", "persist", "polling"],
    },
];

pub fn default_questions() -> Vec<Question> {
    SEED.iter()
        .map(|s| Question {
            id: Uuid::new_v4(),
            domain: s.domain.to_string(),
            difficulty: s.difficulty,
            prompt: s.prompt.to_string(),
            model_answer: s.model_answer.to_string(),
            keywords: s.keywords.iter().map(|k| k.to_string()).collect(),
            category: s.category.to_string(),
            is_active: true,
        })
        .collect()
}
