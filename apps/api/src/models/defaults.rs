//! Built-in sample resume used when no snapshot is available.

use crate::models::resume::{
    Certification, CustomSection, CustomSectionItem, Education, Experience, PersonalInfo,
    Project, ResumeDocument, DEFAULT_THEME_COLOR,
};

pub fn bootstrap_document() -> ResumeDocument {
    ResumeDocument {
        personal_info: PersonalInfo {
            full_name: "Jordan Smith".into(),
            email: "jordan.smith@example.com".into(),
            phone: "+1 (555) 987-6543".into(),
            location: "Seattle, WA".into(),
            website: "jordansmith.dev".into(),
            linkedin: "linkedin.com/in/jordansmith".into(),
            job_title: "Junior Software Engineer".into(),
            summary: "Motivated Computer Science graduate with a strong foundation in \
                full-stack development. Passionate about building scalable web applications \
                and learning new technologies. Proven ability to work in agile environments \
                through internships and academic projects. Seeking a challenging role to \
                contribute to innovative software solutions."
                .into(),
        },
        experience: vec![
            Experience {
                id: "1".into(),
                title: "Software Engineering Intern".into(),
                company: "Innovate Tech Solutions".into(),
                start_date: "Jun 2023".into(),
                end_date: "Aug 2023".into(),
                current: false,
                description: "• Collaborated with a team of 5 to develop a feature for the \
                    internal dashboard using React and Node.js.\n\
                    • Assisted in writing unit tests, increasing code coverage by 15%.\n\
                    • Participated in daily stand-ups and code reviews to ensure code quality."
                    .into(),
            },
            Experience {
                id: "2".into(),
                title: "Frontend Developer (Volunteer)".into(),
                company: "Local Non-Profit".into(),
                start_date: "Jan 2023".into(),
                end_date: "May 2023".into(),
                current: false,
                description: "• Revamped the organization's website, improving mobile \
                    responsiveness and accessibility.\n\
                    • Implemented a donation form integrated with Stripe API.\n\
                    • Maintained website content and fixed bugs reported by users."
                    .into(),
            },
        ],
        education: vec![Education {
            id: "1".into(),
            school: "University of Washington".into(),
            degree: "B.S. in Computer Science".into(),
            graduation_date: "May 2024".into(),
            description: "GPA: 3.8/4.0. Relevant Coursework: Data Structures, Algorithms, \
                Web Development, Database Systems, Artificial Intelligence."
                .into(),
        }],
        skills: [
            "JavaScript (ES6+)",
            "TypeScript",
            "React.js",
            "Node.js",
            "Python",
            "Git/GitHub",
            "SQL",
            "Tailwind CSS",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        projects: vec![
            Project {
                id: "1".into(),
                name: "TaskMaster App".into(),
                link: "github.com/jordan/taskmaster".into(),
                description: "A productivity application allowing users to manage tasks with \
                    drag-and-drop functionality. Built with React, Redux, and Firebase."
                    .into(),
            },
            Project {
                id: "2".into(),
                name: "Weather Forecaster".into(),
                link: "weather-forecaster-demo.com".into(),
                description: "A weather dashboard consuming OpenWeatherMap API to display \
                    real-time weather data. Features include location search and 5-day forecast."
                    .into(),
            },
        ],
        certifications: vec![Certification {
            id: "1".into(),
            name: "AWS Certified Cloud Practitioner".into(),
            issuer: "Amazon Web Services".into(),
            date: "Aug 2023".into(),
            link: "aws.amazon.com/verify".into(),
        }],
        custom_sections: vec![CustomSection {
            id: "1".into(),
            title: "Awards & Honors".into(),
            items: vec![CustomSectionItem {
                id: "1".into(),
                title: "Dean's List".into(),
                subtitle: "University of Washington".into(),
                date: "2021 - 2024".into(),
                description: "Awarded for maintaining a GPA above 3.5 for 6 consecutive \
                    semesters."
                    .into(),
            }],
        }],
        theme_color: DEFAULT_THEME_COLOR.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bootstrap_ids_unique_per_collection() {
        let doc = bootstrap_document();
        let ids: HashSet<_> = doc.experience.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), doc.experience.len());
        let ids: HashSet<_> = doc.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), doc.projects.len());
    }

    #[test]
    fn test_bootstrap_is_fully_populated() {
        let doc = bootstrap_document();
        assert_eq!(doc.personal_info.full_name, "Jordan Smith");
        assert_eq!(doc.skills.len(), 8);
        assert_eq!(doc.custom_sections[0].items.len(), 1);
    }
}
