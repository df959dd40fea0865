//! Sample resumes used by the `demo` command.

pub(crate) const JOHN_SMITH: &str = "
JOHN SMITH
john.smith@email.com | +91-9876543210

PROFESSIONAL SUMMARY
Experienced Software Engineer with 5+ years of expertise in full-stack development and cloud technologies.

EDUCATION
B.Tech in Computer Science - Indian Institute of Technology (IIT) Delhi, 2018
CGPA: 8.5/10

SKILLS
Programming Languages: Python, Java, JavaScript, C++
Web Technologies: HTML, CSS, React, Angular, Node.js
Databases: MySQL, PostgreSQL, MongoDB
Cloud & DevOps: AWS, Docker, Kubernetes, Jenkins
Other: Git, REST API, GraphQL, Machine Learning

EXPERIENCE
Senior Software Engineer - TechCorp Solutions (2021 - Present)
- Led development of microservices architecture serving 1M+ users
- Mentored 5+ junior developers

Junior Developer - StartupXYZ (2018 - 2019)
- Built REST APIs using Flask and Node.js
";

pub(crate) const SARAH_JOHNSON: &str = "
Sarah Johnson
sarah.johnson@example.com
Phone: +1-415-555-0123

EDUCATION
Master of Science in Data Science - University of California, Berkeley (2021)
Bachelor of Science in Statistics - Stanford University (2019)

TECHNICAL SKILLS
Languages: Python, R, SQL, Java
Machine Learning: TensorFlow, PyTorch, XGBoost
Cloud Platforms: AWS, Google Cloud Platform, Azure
Tools: Jupyter, Git, Apache Spark

PROFESSIONAL EXPERIENCE
Senior Data Scientist - Google (2021 - Present)
- Built machine learning models for recommendation engine

Data Analyst - Facebook (2020 - 2021)
- Conducted A/B tests and statistical analysis
";

pub(crate) const RAJESH_KUMAR: &str = "
Name: Rajesh Kumar
Email: rajesh.kumar@domain.com
Contact: +91-9988776655

Hello, I'm Rajesh Kumar, a recent graduate with a B.Tech in Computer Science.
I have experience with Python, Java, and web development technologies.

Education:
- B.Tech Computer Science from Delhi Institute of Technology (2023)
- 12th Grade - CBSE Board (2019)

Skills:
I am proficient in Python, JavaScript, and Java programming languages.
I have worked with Flask and Django frameworks for web development.
I am familiar with SQL and have used MySQL and PostgreSQL databases.

Experience:
I completed my 6-month internship at a software company where I worked on web development projects.
";
