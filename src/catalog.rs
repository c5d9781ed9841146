//! The fixed question list rendered by the form.

use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Textarea { rows: usize },
    Radio,
    Checkbox,
    Select,
}

impl InputKind {
    /// Checkbox answers are option sets, everything else is a single string.
    pub fn is_multi(self) -> bool {
        matches!(self, InputKind::Checkbox)
    }
}

#[derive(Clone, Debug)]
pub struct Question {
    pub id: &'static str,
    pub label: &'static str,
    pub sublabel: Option<&'static str>,
    pub kind: InputKind,
    pub options: Vec<String>,
}

pub struct Section {
    pub title: &'static str,
    pub questions: Range<usize>,
}

pub const SURFACE_SUFFIX: &str = "Canvas";

/// Key of the annotation surface paired with a question.
pub fn surface_key(field_id: &str) -> String {
    format!("{field_id}{SURFACE_SUFFIX}")
}

pub fn sections() -> [Section; 4] {
    [
        Section {
            title: "Facility and Clinical Instructor Information",
            questions: 0..4,
        },
        Section {
            title: "DCE Evaluation of the CI/Clinical Site",
            questions: 4..21,
        },
        Section {
            title: "Student Responses",
            questions: 21..24,
        },
        Section {
            title: "Patient Load and Interprofessional Collaboration",
            questions: 24..28,
        },
    ]
}

fn q(id: &'static str, label: &'static str, kind: InputKind, options: &[&str]) -> Question {
    Question {
        id,
        label,
        sublabel: None,
        kind,
        options: options.iter().map(|s| s.to_string()).collect(),
    }
}

fn scale(id: &'static str, label: &'static str, sublabel: &'static str) -> Question {
    Question {
        id,
        label,
        sublabel: Some(sublabel),
        kind: InputKind::Radio,
        options: (1..=10).map(|i| i.to_string()).collect(),
    }
}

const YES_NO: &[&str] = &["Yes", "No"];

pub fn questions() -> Vec<Question> {
    use InputKind::*;
    vec![
        q("facilityName", "1. Facility Name:", Text, &[]),
        q(
            "scceName",
            "2. Site Coordinator of Clinical Education (SCCE) Name:",
            Text,
            &[],
        ),
        q("ciName", "3. Clinical Instructor (CI) Name:", Text, &[]),
        q(
            "ciLicense",
            "4. CI License Type",
            Radio,
            &["Physical Therapist", "Physical Therapist Assistant"],
        ),
        q(
            "ciExperience",
            "5. How many years of experience does the CI have?",
            Radio,
            &["0-1 years", "1-2 years", "3-5 years", "5-9 years", "10+ years"],
        ),
        q(
            "reviewedPolicies",
            "6. Has the student located and reviewed facility policies and procedures?",
            Radio,
            YES_NO,
        ),
        q(
            "communication",
            "7. Do you feel the communication between you (the CI) and the school DCE is effective and sufficient to support the clinical affiliation?",
            Radio,
            YES_NO,
        ),
        q(
            "contactMethod",
            "8. Preferred method of contact for the DCE to discuss student's clinical performance?",
            Checkbox,
            &["Clinical Visits", "Phone", "Email"],
        ),
        q(
            "feedbackFrequency",
            "9. How often do you provide the student with constructive feedback?",
            Checkbox,
            &["Daily", "Weekly", "Midterm/Final"],
        ),
        q(
            "feedbackType",
            "10. What type of feedback is provided?",
            Checkbox,
            &["Oral", "Written", "Demonstration"],
        ),
        q(
            "feedbackTime",
            "11. Do you allow for adequate time for student/CI feedback and discussion?",
            Radio,
            YES_NO,
        ),
        q(
            "preparedness",
            "12. Do you feel the student has been prepared for the clinical experience so far?",
            Radio,
            YES_NO,
        ),
        q(
            "progression",
            "13. Is the student able to properly progress and regress patient treatments?",
            Radio,
            &[
                "Yes, and the student is able to identify when this needs to occur",
                "Yes, but requires v/c from CI to do so",
                "Sometimes. Students ability to identify need as well as proper progression and regression is inconsistent",
                "No. The student is unable to adequately progress or regress a patient without significant help and assistance from CI",
            ],
        ),
        scale(
            "timeManagement",
            "14. How would you rate the students time management skills/abilities?",
            "1 = Little, 10 = Excellent",
        ),
        scale(
            "notesCorrection",
            "15. What percentage of notes requires correction or improvement from the CI?",
            "1 = 100%, 10 = Less than 10% (good)",
        ),
        q(
            "caseLoad",
            "16. What is the normal case load for an Entry Level PTA at this facility?",
            Textarea { rows: 2 },
            &[],
        ),
        q(
            "meetExpectations",
            "17. Are you able to provide the supervision and experiences necessary to meet the clinical expectations? (Including the appropriate student progression and independence with daily treatments.)",
            Radio,
            YES_NO,
        ),
        q(
            "treatmentTechniques",
            "18. Have you shown any treatment techniques that you feel should be a part of our academic coursework?",
            Radio,
            YES_NO,
        ),
        q(
            "specializations",
            "19. Specializations and certifications already achieved:",
            Checkbox,
            &[
                "Level 1 CCIP",
                "Level 2 CCIP",
                "Clinical Specialist (e.g Orthopedics, Neuro, etc)",
                "Advanced Proficiency (Orthopedics, Neurology, etc)",
                "Graston",
                "LSVT Big",
                "Other",
            ],
        ),
        q(
            "ccipInterest",
            "20. Would you be interested in attending a Level 1 CCIP course if provided by the college?",
            Checkbox,
            &[
                "Yes - Late spring/early summer",
                "Yes - Late summer/early fall",
                "Yes - Late fall/early winter",
                "Yes - Late winter/early spring",
                "No",
            ],
        ),
        q(
            "willingToTakeStudent",
            "21. Would you be willing to take another student from our PTA Program?",
            Radio,
            YES_NO,
        ),
        q(
            "firstDayOriented",
            "22. On your first day at your clinical site were you oriented to the department and clinical center by being provided a tour/introduction for the location of appropriate equipment, policies, personnel, and clinical center policies & procedures?",
            Radio,
            YES_NO,
        ),
        q(
            "communicationWithTeam",
            "23. Has the communication with your CI and other healthcare team members been constructive and helpful?",
            Radio,
            YES_NO,
        ),
        q(
            "supervisionStyle",
            "24. Describe the supervision and learning experience provided by your clinical instructor. (Select all that apply)",
            Checkbox,
            &[
                "Collaborative Hands-On Style: The instructor often treats patients alongside the student, providing direct guidance, demonstrations, and immediate feedback during sessions to build skills through joint practice.",
                "Independent Autonomy Style: The instructor gives the student significant space to manage cases independently, stepping in only for critical interventions or debriefs, fostering self-reliance and problem-solving.",
                "Balanced Hybrid Style: The instructor combines elements of hands-on collaboration and independent space, adjusting based on the student's progress, the complexity of the case, or specific learning needs.",
                "Micromanaging Oversight Style: The instructor closely supervises every detail of the student's work, offering constant directives and corrections, which may limit the student's ability to develop autonomy or treat patients effectively on their own.",
                "Mentorship-Focused Style: The instructor acts as a mentor, offering advice and resources while encouraging the student to lead, with regular check-ins to discuss decisions and outcomes without constant presence.",
                "Observational Feedback Style: The instructor primarily observes the student from a distance, providing post-session feedback and discussions to analyze performance, allowing the student to learn through trial and reflection.",
            ],
        ),
        q(
            "patientsPerDay",
            "25. How many patients are treating (taking the lead with) per day?",
            Select,
            &["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12+"],
        ),
        q(
            "vitals",
            "26. Does this level/type of patient care require you to take frequent vitals and monitor vitals?",
            Radio,
            &[
                "Yes, I take and monitor vitals consistently and often",
                "Yes, I take and monitor vitals occasionally",
                "I rarely have to take and monitor vitals (but have a handful of times)",
                "No. I have not yet needed to take vitals or monitor vitals for my patients.",
            ],
        ),
        q(
            "ipeInvolvement",
            "27. Have you been involved with IPE/co-treatments at the clinical center?",
            Radio,
            YES_NO,
        ),
        q("otherConcerns", "28. Any other concerns?", Textarea { rows: 4 }, &[]),
    ]
}
