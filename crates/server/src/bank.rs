//! Question bank served by the quiz service.

/// One gradeable item. `correct` indexes into `options`.
#[derive(Debug)]
pub struct BankEntry {
    pub id: &'static str,
    pub question: &'static str,
    pub options: &'static [&'static str],
    pub correct: usize,
    pub explanation: &'static str,
    pub subject: &'static str,
    pub difficulty: u8,
}

impl BankEntry {
    #[must_use]
    pub fn correct_answer(&self) -> &'static str {
        self.options[self.correct]
    }
}

pub const QUESTION_BANK: &[BankEntry] = &[
    BankEntry {
        id: "math_1",
        question: "What is 15 + 27?",
        options: &["42", "32", "52", "37"],
        correct: 0,
        explanation: "Add the ones first: 5 + 7 = 12, write 2 carry 1; then the tens: 1 + 2 + 1 = 4.",
        subject: "Mathematics",
        difficulty: 1,
    },
    BankEntry {
        id: "math_2",
        question: "Solve for x: 2x + 5 = 15",
        options: &["x = 5", "x = 10", "x = 7.5", "x = 20"],
        correct: 0,
        explanation: "Subtract 5 from both sides to get 2x = 10, then divide by 2.",
        subject: "Mathematics",
        difficulty: 2,
    },
    BankEntry {
        id: "math_3",
        question: "What is the derivative of x²?",
        options: &["x", "2x", "x²", "2"],
        correct: 1,
        explanation: "By the power rule d/dx(xⁿ) = n·xⁿ⁻¹, so d/dx(x²) = 2x.",
        subject: "Mathematics",
        difficulty: 2,
    },
    BankEntry {
        id: "math_4",
        question: "What is 75% of 200?",
        options: &["150", "175", "125", "100"],
        correct: 0,
        explanation: "0.75 × 200 = 150; equivalently 25% is 50 and 75% is three times that.",
        subject: "Mathematics",
        difficulty: 1,
    },
    BankEntry {
        id: "math_5",
        question: "What is the area of a rectangle with length 8 and width 5?",
        options: &["40", "13", "45", "35"],
        correct: 0,
        explanation: "Area is length × width: 8 × 5 = 40.",
        subject: "Mathematics",
        difficulty: 1,
    },
    BankEntry {
        id: "math_6",
        question: "What is 12 × 7?",
        options: &["84", "72", "96", "78"],
        correct: 0,
        explanation: "10 × 7 = 70 and 2 × 7 = 14, so 70 + 14 = 84.",
        subject: "Mathematics",
        difficulty: 1,
    },
    BankEntry {
        id: "math_7",
        question: "What is the square root of 64?",
        options: &["8", "6", "7", "9"],
        correct: 0,
        explanation: "8 × 8 = 64.",
        subject: "Mathematics",
        difficulty: 1,
    },
    BankEntry {
        id: "math_8",
        question: "What is 144 ÷ 12?",
        options: &["12", "10", "14", "11"],
        correct: 0,
        explanation: "12 × 12 = 144.",
        subject: "Mathematics",
        difficulty: 1,
    },
    BankEntry {
        id: "sci_1",
        question: "Which planet is closest to the Sun?",
        options: &["Venus", "Mars", "Mercury", "Earth"],
        correct: 2,
        explanation: "Mercury orbits closest to the Sun and is the smallest planet.",
        subject: "Science",
        difficulty: 1,
    },
    BankEntry {
        id: "sci_2",
        question: "What is the chemical symbol for water?",
        options: &["H₂O", "CO₂", "O₂", "NaCl"],
        correct: 0,
        explanation: "Two hydrogen atoms bonded to one oxygen atom.",
        subject: "Science",
        difficulty: 1,
    },
    BankEntry {
        id: "sci_3",
        question: "Which organ pumps blood throughout the body?",
        options: &["Liver", "Heart", "Brain", "Lungs"],
        correct: 1,
        explanation: "The heart is the muscle driving the circulatory system.",
        subject: "Science",
        difficulty: 1,
    },
    BankEntry {
        id: "sci_4",
        question: "What force keeps us on the ground?",
        options: &["Magnetism", "Gravity", "Friction", "Inertia"],
        correct: 1,
        explanation: "Gravity attracts masses toward each other.",
        subject: "Science",
        difficulty: 1,
    },
    BankEntry {
        id: "sci_5",
        question: "What is the atomic number of Oxygen?",
        options: &["8", "6", "16", "10"],
        correct: 0,
        explanation: "Oxygen has 8 protons in its nucleus.",
        subject: "Science",
        difficulty: 2,
    },
    BankEntry {
        id: "sci_6",
        question: "Which gas do plants absorb during photosynthesis?",
        options: &["Oxygen", "Carbon Dioxide", "Nitrogen", "Hydrogen"],
        correct: 1,
        explanation: "Plants take in CO₂ and release oxygen.",
        subject: "Science",
        difficulty: 1,
    },
    BankEntry {
        id: "sci_7",
        question: "What is the largest planet in our solar system?",
        options: &["Earth", "Saturn", "Jupiter", "Neptune"],
        correct: 2,
        explanation: "Jupiter is more than twice as massive as all other planets combined.",
        subject: "Science",
        difficulty: 1,
    },
    BankEntry {
        id: "sci_8",
        question: "What is the main component of air?",
        options: &["Oxygen", "Carbon Dioxide", "Nitrogen", "Hydrogen"],
        correct: 2,
        explanation: "Nitrogen makes up about 78% of the atmosphere.",
        subject: "Science",
        difficulty: 1,
    },
    BankEntry {
        id: "gk_1",
        question: "Who wrote 'Romeo and Juliet'?",
        options: &["Charles Dickens", "William Shakespeare", "Jane Austen", "Mark Twain"],
        correct: 1,
        explanation: "Shakespeare wrote it in the late 16th century.",
        subject: "General Knowledge",
        difficulty: 1,
    },
    BankEntry {
        id: "gk_2",
        question: "What is the capital of France?",
        options: &["London", "Berlin", "Madrid", "Paris"],
        correct: 3,
        explanation: "Paris is the capital and most populous city of France.",
        subject: "General Knowledge",
        difficulty: 1,
    },
    BankEntry {
        id: "gk_3",
        question: "Who painted the Mona Lisa?",
        options: &["Vincent van Gogh", "Pablo Picasso", "Leonardo da Vinci", "Michelangelo"],
        correct: 2,
        explanation: "Leonardo da Vinci painted it in the early 16th century.",
        subject: "General Knowledge",
        difficulty: 1,
    },
    BankEntry {
        id: "gk_4",
        question: "What is the largest ocean on Earth?",
        options: &["Atlantic Ocean", "Indian Ocean", "Arctic Ocean", "Pacific Ocean"],
        correct: 3,
        explanation: "The Pacific is both the largest and the deepest ocean.",
        subject: "General Knowledge",
        difficulty: 1,
    },
];
