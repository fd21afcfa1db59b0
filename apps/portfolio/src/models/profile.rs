//! Static portfolio content. Everything the page shows that is not AI output.

use serde::Serialize;

/// Icon names rendered as inline glyphs by the page renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Code,
    Cpu,
    Layers,
    Function,
    Database,
    Wind,
    Terminal,
    GitBranch,
    Bot,
    Leaf,
    ScanFace,
    HeartPulse,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Skill {
    pub name: &'static str,
    pub icon: Icon,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Experience {
    pub role: &'static str,
    pub company: &'static str,
    pub period: &'static str,
    pub highlights: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub repo_url: &'static str,
    pub icon: Icon,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Profile {
    pub name: &'static str,
    pub short_name: &'static str,
    pub initials: &'static str,
    pub tagline: &'static str,
    pub summary: &'static str,
    pub about: &'static [&'static str],
    pub photo_path: &'static str,
    pub photo_fallback: &'static str,
    pub email: &'static str,
    pub github_url: &'static str,
    pub linkedin_url: &'static str,
    pub contact_blurb: &'static str,
    pub nav: &'static [NavLink],
    pub skills: &'static [Skill],
    pub experience: &'static [Experience],
    pub projects: &'static [Project],
}

impl Profile {
    pub fn project(&self, index: usize) -> Option<&'static Project> {
        self.projects.get(index)
    }
}

pub const PROFILE: Profile = Profile {
    name: "Immani Sai",
    short_name: "Sai",
    initials: "IS",
    tagline: "I build intelligent systems.",
    summary: "I'm an AI/ML Engineer specializing in building robust machine learning models \
              and deploying them as impactful applications. I turn complex data into \
              intelligent solutions.",
    about: &[
        "Hello! I'm Sai, a passionate Computer Science student at SRM Institute of Science \
         and Technology with a deep-seated interest in Artificial Intelligence and Machine \
         Learning. My academic journey is complemented by hands-on experience in building \
         and deploying ML models.",
        "From developing a customer churn prediction model to creating projects like crop \
         disease detection and face recognition systems, I thrive on solving real-world \
         problems with code.",
    ],
    photo_path: "/static/sai_immani.jpg",
    photo_fallback: "https://placehold.co/400x400/000000/FFFFFF?text=Image+Error",
    email: "saichowdaryimmani@gmail.com",
    github_url: "https://github.com/saiimmani",
    linkedin_url: "https://www.linkedin.com/in/sai-immani",
    contact_blurb: "I'm currently seeking new opportunities and am open to collaboration. \
                    My inbox is always open, whether you have a question or just want to \
                    connect, you can reach out to me on LinkedIn.",
    nav: &[
        NavLink { href: "#about", label: "About" },
        NavLink { href: "#skills", label: "Skills" },
        NavLink { href: "#experience", label: "Experience" },
        NavLink { href: "#projects", label: "Projects" },
        NavLink { href: "#contact", label: "Contact" },
    ],
    skills: &[
        Skill { name: "Python", icon: Icon::Code },
        Skill { name: "TensorFlow", icon: Icon::Cpu },
        Skill { name: "PyTorch", icon: Icon::Layers },
        Skill { name: "Scikit-learn", icon: Icon::Function },
        Skill { name: "SQL", icon: Icon::Database },
        Skill { name: "Streamlit", icon: Icon::Wind },
        Skill { name: "Flask", icon: Icon::Terminal },
        Skill { name: "Git", icon: Icon::GitBranch },
    ],
    experience: &[Experience {
        role: "AI & Cloud Intern",
        company: "Edunet Foundation",
        period: "Sept 2025 - Present",
        highlights: &[
            "Built and validated a customer churn prediction model using Python & \
             Scikit-learn to identify key retention risk factors.",
            "Developed an interactive Streamlit application to visualize model predictions, \
             feature importances, and evaluation metrics.",
            "Improved ML workflow by creating reproducible scripts, data pipelines using \
             Pandas, and documenting experiments.",
        ],
    }],
    projects: &[
        Project {
            title: "AI Study Buddy",
            description: "An interactive AI-powered study assistant built with Python and \
                          Streamlit to provide users with instant academic support.",
            tags: &["Python", "Streamlit", "NLP", "AI/ML"],
            repo_url: "https://github.com/saiimmani/ai-study-buddy.git",
            icon: Icon::Bot,
        },
        Project {
            title: "Crop Disease Prediction Model",
            description: "Trained a CNN to distinguish common crop diseases with 95% \
                          validation accuracy. Implemented robust image preprocessing with \
                          OpenCV.",
            tags: &["Python", "TensorFlow", "OpenCV", "CNN"],
            repo_url: "https://github.com/saiimmani/LeafDiseasePredictionModel.git",
            icon: Icon::Leaf,
        },
        Project {
            title: "Face Recognition Attendance System",
            description: "A prototype for real-time attendance automation from a webcam \
                          feed, using an ML pipeline for face embedding and matching.",
            tags: &["Python", "OpenCV", "Scikit-learn", "Tkinter"],
            repo_url: "https://github.com/saiimmani/FaceRecognitionAttendanceSystem.git",
            icon: Icon::ScanFace,
        },
        Project {
            title: "Intelligent Fitness Tracker",
            description: "An intelligent fitness tracker desktop application built using \
                          Python's Tkinter GUI toolkit and Scikit-learn. It allows users to \
                          register/login, calculate BMI, receive personalized workout \
                          recommendations, log daily workout data, predict calorie burn \
                          trends using Linear Regression, and get expert fitness advice.",
            tags: &["Python", "Tkinter", "Scikit-learn", "ML"],
            repo_url: "https://github.com/saiimmani/Fitness-Tracker.git",
            icon: Icon::HeartPulse,
        },
    ],
};
